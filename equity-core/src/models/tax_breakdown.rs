use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Itemized tax liability for a single taxable event or scenario.
///
/// The amount fields are authoritative; the rate fields record the
/// headline marginal rate applied to each bucket and are informational
/// (a scenario mixing ordinary and capital-gain income reports the
/// dominant federal rate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub federal_rate: Decimal,
    pub federal_amount: Decimal,
    pub niit_rate: Decimal,
    pub niit_amount: Decimal,
    pub state_rate: Decimal,
    pub state_amount: Decimal,
    pub total: Decimal,
}

impl TaxBreakdown {
    pub const ZERO: Self = Self {
        federal_rate: Decimal::ZERO,
        federal_amount: Decimal::ZERO,
        niit_rate: Decimal::ZERO,
        niit_amount: Decimal::ZERO,
        state_rate: Decimal::ZERO,
        state_amount: Decimal::ZERO,
        total: Decimal::ZERO,
    };
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn zero_breakdown_is_all_zeroes() {
        let breakdown = TaxBreakdown::ZERO;

        assert_eq!(breakdown.total, Decimal::ZERO);
        assert_eq!(breakdown.federal_amount, Decimal::ZERO);
        assert_eq!(breakdown.niit_amount, Decimal::ZERO);
        assert_eq!(breakdown.state_amount, Decimal::ZERO);
    }
}
