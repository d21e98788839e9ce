//! Effective rate resolution for a client's tax profile.
//!
//! State rate: client override, else state table, else the table's
//! fallback category. Federal LTCG rate: client override, else a
//! two-tier threshold test on the client's ordinary bracket. The
//! two-tier LTCG model is an intentional simplification of the real
//! multi-bracket schedule and is preserved as specified.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Client, TaxYearConfig};

/// Effective state and federal long-term-capital-gains rates for a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveRates {
    /// Effective state income tax rate, as a fraction.
    pub state_rate: Decimal,
    /// Federal long-term capital gains rate, as a fraction.
    pub fed_ltcg_rate: Decimal,
}

/// Resolves a client's effective rates against a tax-year rule set.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use equity_core::calculations::RateResolver;
/// use equity_core::{Client, FilingStatusCode, TaxYearConfig};
///
/// let config = TaxYearConfig::projected();
/// let client = Client {
///     id: 1,
///     name: "Example".to_string(),
///     filing_status: FilingStatusCode::MarriedFilingJointly,
///     federal_bracket: dec!(37),
///     state: "CA".to_string(),
///     annual_income: None,
///     state_rate_override: None,
///     ltcg_rate_override: None,
///     grants: Vec::new(),
///     planned_exercises: Vec::new(),
/// };
///
/// let rates = RateResolver::new(&config).resolve(&client);
///
/// assert_eq!(rates.state_rate, dec!(0.144));
/// assert_eq!(rates.fed_ltcg_rate, dec!(0.20)); // bracket > 33
/// ```
#[derive(Debug, Clone)]
pub struct RateResolver<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> RateResolver<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Resolves both effective rates. Pure; overrides always win,
    /// including an explicit zero.
    pub fn resolve(
        &self,
        client: &Client,
    ) -> EffectiveRates {
        EffectiveRates {
            state_rate: self.state_rate(client),
            fed_ltcg_rate: self.fed_ltcg_rate(client),
        }
    }

    fn state_rate(
        &self,
        client: &Client,
    ) -> Decimal {
        client
            .state_rate_override
            .unwrap_or_else(|| self.config.state_rates.rate_for(&client.state))
    }

    fn fed_ltcg_rate(
        &self,
        client: &Client,
    ) -> Decimal {
        client.ltcg_rate_override.unwrap_or_else(|| {
            if client.federal_bracket > self.config.ltcg_bracket_threshold {
                self.config.ltcg_high_rate
            } else {
                self.config.ltcg_low_rate
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::FilingStatusCode;

    fn client(state: &str, bracket: Decimal) -> Client {
        Client {
            id: 1,
            name: "Test".to_string(),
            filing_status: FilingStatusCode::Single,
            federal_bracket: bracket,
            state: state.to_string(),
            annual_income: None,
            state_rate_override: None,
            ltcg_rate_override: None,
            grants: Vec::new(),
            planned_exercises: Vec::new(),
        }
    }

    // =========================================================================
    // state rate tests
    // =========================================================================

    #[test]
    fn state_rate_comes_from_table() {
        let config = TaxYearConfig::projected();
        let resolver = RateResolver::new(&config);

        let rates = resolver.resolve(&client("CA", dec!(37)));

        assert_eq!(rates.state_rate, dec!(0.144));
    }

    #[test]
    fn unknown_state_uses_fallback_rate() {
        let config = TaxYearConfig::projected();
        let resolver = RateResolver::new(&config);

        let rates = resolver.resolve(&client("ZZ", dec!(37)));

        assert_eq!(rates.state_rate, config.state_rates.fallback_rate);
    }

    #[test]
    fn state_override_beats_table() {
        let config = TaxYearConfig::projected();
        let resolver = RateResolver::new(&config);
        let mut c = client("CA", dec!(37));
        c.state_rate_override = Some(dec!(0.08));

        let rates = resolver.resolve(&c);

        assert_eq!(rates.state_rate, dec!(0.08));
    }

    #[test]
    fn zero_state_override_is_honored() {
        let config = TaxYearConfig::projected();
        let resolver = RateResolver::new(&config);
        let mut c = client("CA", dec!(37));
        c.state_rate_override = Some(dec!(0));

        let rates = resolver.resolve(&c);

        assert_eq!(rates.state_rate, dec!(0));
    }

    // =========================================================================
    // LTCG rate tests
    // =========================================================================

    #[test]
    fn high_bracket_gets_high_ltcg_rate() {
        let config = TaxYearConfig::projected();
        let resolver = RateResolver::new(&config);

        let rates = resolver.resolve(&client("CA", dec!(35)));

        assert_eq!(rates.fed_ltcg_rate, dec!(0.20));
    }

    #[test]
    fn threshold_bracket_stays_at_low_ltcg_rate() {
        let config = TaxYearConfig::projected();
        let resolver = RateResolver::new(&config);

        // The threshold test is strict: 33 is not above 33.
        let rates = resolver.resolve(&client("CA", dec!(33)));

        assert_eq!(rates.fed_ltcg_rate, dec!(0.15));
    }

    #[test]
    fn ltcg_override_skips_threshold_test() {
        let config = TaxYearConfig::projected();
        let resolver = RateResolver::new(&config);
        let mut c = client("CA", dec!(37));
        c.ltcg_rate_override = Some(dec!(0.238));

        let rates = resolver.resolve(&c);

        assert_eq!(rates.fed_ltcg_rate, dec!(0.238));
    }
}
