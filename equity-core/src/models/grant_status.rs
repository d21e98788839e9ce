use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Share-count summary for a grant at an evaluation date.
///
/// `available` is clamped at zero: planned exercises exceeding tracked
/// vesting indicate a caller error, not an engine fault, and must never
/// surface as a negative count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantStatus {
    pub total: Decimal,
    pub vested: Decimal,
    pub unvested: Decimal,
    pub exercised: Decimal,
    /// max(0, vested − exercised).
    pub available: Decimal,
}
