use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The kind of equity award a grant represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantKind {
    /// Restricted stock units, taxed as ordinary income at vesting.
    Rsu,
    /// Incentive stock options, taxed at exercise/sale, never at vesting.
    Iso,
}

/// Supported vesting schedule shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VestingVariant {
    /// 25% cliff at twelve months, then twelve equal quarterly tranches
    /// releasing the remaining 75%.
    CliffThenQuarterly,
    /// Sixteen equal quarterly tranches, first at three months.
    Quarterly,
}

/// An equity award held by a client.
///
/// `strike_price` is required for ISO grants and meaningless for RSU
/// grants; `withholding_rate` applies to RSU grants only and falls back
/// to the configured supplemental rate (22%) when absent. Both are
/// explicit `Option`s so that an elected zero is distinguishable from
/// "not set".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub id: i64,
    pub kind: GrantKind,
    /// Exchange ticker; empty for private companies.
    pub ticker: String,
    /// Current fair market value per share.
    pub current_price: Decimal,
    pub strike_price: Option<Decimal>,
    pub grant_date: NaiveDate,
    pub total_shares: Decimal,
    pub vesting_variant: VestingVariant,
    pub withholding_rate: Option<Decimal>,
}

impl Grant {
    /// Whether the issuer is a private company (no ticker on file).
    pub fn is_private(&self) -> bool {
        self.ticker.is_empty()
    }

    /// The strike price of an ISO grant.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotAnIsoGrant`] for RSU grants and
    /// [`EngineError::MissingStrikePrice`] for ISO grants without one.
    pub fn strike(&self) -> Result<Decimal, EngineError> {
        match self.kind {
            GrantKind::Rsu => Err(EngineError::NotAnIsoGrant { grant_id: self.id }),
            GrantKind::Iso => self
                .strike_price
                .ok_or(EngineError::MissingStrikePrice { grant_id: self.id }),
        }
    }

    /// Validates the grant's invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if:
    /// - `total_shares` is zero or negative
    /// - `current_price` is negative
    /// - an ISO grant has no strike price, or a negative one
    /// - an elected withholding rate is outside [0, 1]
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.total_shares <= Decimal::ZERO {
            return Err(EngineError::InvalidShareCount(self.total_shares));
        }
        if self.current_price < Decimal::ZERO {
            return Err(EngineError::NegativePrice(self.current_price));
        }
        if let Some(rate) = self.withholding_rate {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(EngineError::InvalidWithholdingRate(rate));
            }
        }
        if self.kind == GrantKind::Iso {
            match self.strike_price {
                None => return Err(EngineError::MissingStrikePrice { grant_id: self.id }),
                Some(strike) if strike < Decimal::ZERO => {
                    return Err(EngineError::NegativeStrike(strike));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn rsu_grant() -> Grant {
        Grant {
            id: 1,
            kind: GrantKind::Rsu,
            ticker: "ACME".to_string(),
            current_price: dec!(50),
            strike_price: None,
            grant_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            total_shares: dec!(1000),
            vesting_variant: VestingVariant::CliffThenQuarterly,
            withholding_rate: None,
        }
    }

    #[test]
    fn validate_accepts_well_formed_rsu() {
        assert_eq!(rsu_grant().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_non_positive_shares() {
        let mut grant = rsu_grant();
        grant.total_shares = dec!(0);

        assert_eq!(
            grant.validate(),
            Err(EngineError::InvalidShareCount(dec!(0)))
        );
    }

    #[test]
    fn validate_rejects_negative_price() {
        let mut grant = rsu_grant();
        grant.current_price = dec!(-1);

        assert_eq!(grant.validate(), Err(EngineError::NegativePrice(dec!(-1))));
    }

    #[test]
    fn validate_rejects_iso_without_strike() {
        let mut grant = rsu_grant();
        grant.kind = GrantKind::Iso;
        grant.strike_price = None;

        assert_eq!(
            grant.validate(),
            Err(EngineError::MissingStrikePrice { grant_id: 1 })
        );
    }

    #[test]
    fn validate_rejects_out_of_range_withholding_rate() {
        let mut grant = rsu_grant();
        grant.withholding_rate = Some(dec!(1.5));

        assert_eq!(
            grant.validate(),
            Err(EngineError::InvalidWithholdingRate(dec!(1.5)))
        );
    }

    #[test]
    fn zero_withholding_rate_is_a_valid_election() {
        let mut grant = rsu_grant();
        grant.withholding_rate = Some(dec!(0));

        assert_eq!(grant.validate(), Ok(()));
    }

    #[test]
    fn strike_rejects_rsu_grants() {
        assert_eq!(
            rsu_grant().strike(),
            Err(EngineError::NotAnIsoGrant { grant_id: 1 })
        );
    }

    #[test]
    fn private_company_has_empty_ticker() {
        let mut grant = rsu_grant();
        grant.ticker = String::new();

        assert!(grant.is_private());
    }
}
