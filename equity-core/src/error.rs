use rust_decimal::Decimal;
use thiserror::Error;

/// Errors produced by the calculation engine.
///
/// Every variant is a local, recoverable condition: either an input that
/// fails validation or a configuration fault. Nothing here is retryable
/// and nothing should be treated as process-fatal.
///
/// Two conditions are deliberately *not* errors:
/// - a zero grant price makes sell-to-cover share math undefined, so the
///   vesting event reports `shares_sold_to_cover = None` instead;
/// - an unknown state code resolves to the state table's fallback rate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A share count was zero or negative where a positive count is required.
    #[error("share count must be positive, got {0}")]
    InvalidShareCount(Decimal),

    /// An ISO grant is missing its strike price.
    ///
    /// The strike is required for every ISO computation; a missing value
    /// is rejected rather than silently defaulted to zero.
    #[error("ISO grant {grant_id} has no strike price")]
    MissingStrikePrice { grant_id: i64 },

    /// A fair-market-value price was negative.
    #[error("price must be non-negative, got {0}")]
    NegativePrice(Decimal),

    /// A strike price was negative.
    #[error("strike price must be non-negative, got {0}")]
    NegativeStrike(Decimal),

    /// A sale price was negative.
    #[error("sale price must be non-negative, got {0}")]
    NegativeSalePrice(Decimal),

    /// A client's federal ordinary bracket was outside [0, 100] percent.
    #[error("federal bracket must be between 0 and 100 percent, got {0}")]
    BracketOutOfRange(Decimal),

    /// An elected withholding rate was outside [0, 1].
    #[error("withholding rate must be between 0 and 1, got {0}")]
    InvalidWithholdingRate(Decimal),

    /// A planned exercise referenced a grant that is not an ISO grant.
    #[error("grant {grant_id} is not an ISO grant and cannot be exercised")]
    NotAnIsoGrant { grant_id: i64 },

    /// The tax year configuration has no ordinary brackets for a filing
    /// status. This is a configuration fault, not a client-input fault.
    #[error("no ordinary tax brackets configured")]
    NoTaxBrackets,

    /// Vesting date arithmetic overflowed the calendar range.
    #[error("vesting date arithmetic overflowed")]
    VestingDateOverflow,
}
