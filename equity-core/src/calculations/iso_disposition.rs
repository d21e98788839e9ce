//! Qualified vs. disqualified ISO sale scenarios.
//!
//! A qualified disposition (held ≥ 1 year past exercise and ≥ 2 years
//! past grant) taxes the entire gain over the exercise cost at the
//! long-term capital gains rate plus NIIT and state tax, and carries the
//! full bargain element as an AMT preference item from the exercise
//! year. A disqualifying disposition converts the bargain element (up to
//! the actual gain) into ordinary income, taxes any excess gain above
//! the exercise-date FMV as capital gain, and eliminates the AMT
//! preference in the same tax year.

use rust_decimal::Decimal;

use crate::calculations::common::{non_negative, round_half_up};
use crate::calculations::rates::RateResolver;
use crate::error::EngineError;
use crate::models::{Client, DispositionKind, IsoComparison, IsoScenario, TaxBreakdown, TaxYearConfig};

/// Inputs for one ISO what-if query.
#[derive(Debug, Clone, Copy)]
pub struct IsoSaleTerms {
    pub shares: Decimal,
    pub strike_price: Decimal,
    pub fmv_at_exercise: Decimal,
    pub sale_price: Decimal,
}

impl IsoSaleTerms {
    fn validate(&self) -> Result<(), EngineError> {
        if self.shares <= Decimal::ZERO {
            return Err(EngineError::InvalidShareCount(self.shares));
        }
        if self.strike_price < Decimal::ZERO {
            return Err(EngineError::NegativeStrike(self.strike_price));
        }
        if self.fmv_at_exercise < Decimal::ZERO {
            return Err(EngineError::NegativePrice(self.fmv_at_exercise));
        }
        if self.sale_price < Decimal::ZERO {
            return Err(EngineError::NegativeSalePrice(self.sale_price));
        }
        Ok(())
    }
}

/// Computes full ISO disposition scenarios for a client.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use equity_core::calculations::{IsoDispositionComparator, IsoSaleTerms};
/// use equity_core::{Client, DispositionKind, FilingStatusCode, TaxYearConfig};
///
/// let config = TaxYearConfig::projected();
/// let comparator = IsoDispositionComparator::new(&config);
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
/// let terms = IsoSaleTerms {
///     shares: dec!(1000),
///     strike_price: dec!(10),
///     fmv_at_exercise: dec!(50),
///     sale_price: dec!(100),
/// };
///
/// let scenario = comparator
///     .scenario(terms, &client, DispositionKind::Qualified)
///     .unwrap();
///
/// assert_eq!(scenario.capital_gain, dec!(90000.00));
/// assert_eq!(scenario.taxes.total, dec!(34380.00));
/// assert_eq!(scenario.net_profit, dec!(55620.00));
/// ```
#[derive(Debug, Clone)]
pub struct IsoDispositionComparator<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> IsoDispositionComparator<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Computes a single disposition scenario.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] on non-positive shares, negative prices,
    /// or an invalid client bracket.
    pub fn scenario(
        &self,
        terms: IsoSaleTerms,
        client: &Client,
        disposition: DispositionKind,
    ) -> Result<IsoScenario, EngineError> {
        terms.validate()?;
        client.validate()?;

        let rates = RateResolver::new(self.config).resolve(client);

        let exercise_cost = round_half_up(terms.shares * terms.strike_price);
        let sale_proceeds = round_half_up(terms.shares * terms.sale_price);
        let bargain_element = round_half_up(non_negative(
            (terms.fmv_at_exercise - terms.strike_price) * terms.shares,
        ));

        let scenario = match disposition {
            DispositionKind::Qualified => self.qualified(
                terms,
                exercise_cost,
                sale_proceeds,
                bargain_element,
                rates.fed_ltcg_rate,
                rates.state_rate,
            ),
            DispositionKind::Disqualified => self.disqualified(
                terms,
                client,
                exercise_cost,
                sale_proceeds,
                bargain_element,
                rates.fed_ltcg_rate,
                rates.state_rate,
            ),
        };
        Ok(scenario)
    }

    /// Computes both scenarios for one set of sale terms.
    ///
    /// # Errors
    ///
    /// Same conditions as [`IsoDispositionComparator::scenario`].
    pub fn compare(
        &self,
        terms: IsoSaleTerms,
        client: &Client,
    ) -> Result<IsoComparison, EngineError> {
        Ok(IsoComparison {
            qualified: self.scenario(terms, client, DispositionKind::Qualified)?,
            disqualified: self.scenario(terms, client, DispositionKind::Disqualified)?,
        })
    }

    /// Entire gain over cost is long-term capital gain; the bargain
    /// element remains an AMT preference item from the exercise year.
    fn qualified(
        &self,
        terms: IsoSaleTerms,
        exercise_cost: Decimal,
        sale_proceeds: Decimal,
        bargain_element: Decimal,
        fed_ltcg_rate: Decimal,
        state_rate: Decimal,
    ) -> IsoScenario {
        let capital_gain = non_negative(sale_proceeds - exercise_cost);

        let federal_amount = round_half_up(capital_gain * fed_ltcg_rate);
        let niit_amount = round_half_up(capital_gain * self.config.niit_rate);
        let state_amount = round_half_up(capital_gain * state_rate);
        let taxes = TaxBreakdown {
            federal_rate: fed_ltcg_rate,
            federal_amount,
            niit_rate: self.config.niit_rate,
            niit_amount,
            state_rate,
            state_amount,
            total: federal_amount + niit_amount + state_amount,
        };

        IsoScenario {
            disposition: DispositionKind::Qualified,
            shares: terms.shares,
            fmv_at_exercise: terms.fmv_at_exercise,
            sale_price: terms.sale_price,
            exercise_cost,
            sale_proceeds,
            ordinary_income: Decimal::ZERO,
            capital_gain,
            amt_preference: bargain_element,
            net_profit: sale_proceeds - exercise_cost - taxes.total,
            taxes,
        }
    }

    /// Bargain element (capped at the actual gain, floored at zero)
    /// converts to ordinary income; gain above the exercise-date FMV is
    /// capital gain. The same-year disposition eliminates the AMT
    /// preference.
    fn disqualified(
        &self,
        terms: IsoSaleTerms,
        client: &Client,
        exercise_cost: Decimal,
        sale_proceeds: Decimal,
        bargain_element: Decimal,
        fed_ltcg_rate: Decimal,
        state_rate: Decimal,
    ) -> IsoScenario {
        let actual_gain = sale_proceeds - exercise_cost;
        let ordinary_income = non_negative(bargain_element.min(actual_gain));
        let capital_gain =
            non_negative(sale_proceeds - round_half_up(terms.shares * terms.fmv_at_exercise));

        let ordinary_rate = client.federal_bracket / Decimal::ONE_HUNDRED;
        let federal_amount = round_half_up(ordinary_income * ordinary_rate)
            + round_half_up(capital_gain * fed_ltcg_rate);
        let niit_amount = round_half_up(capital_gain * self.config.niit_rate);
        let state_amount = round_half_up((ordinary_income + capital_gain) * state_rate);
        let taxes = TaxBreakdown {
            federal_rate: ordinary_rate,
            federal_amount,
            niit_rate: self.config.niit_rate,
            niit_amount,
            state_rate,
            state_amount,
            total: federal_amount + niit_amount + state_amount,
        };

        IsoScenario {
            disposition: DispositionKind::Disqualified,
            shares: terms.shares,
            fmv_at_exercise: terms.fmv_at_exercise,
            sale_price: terms.sale_price,
            exercise_cost,
            sale_proceeds,
            ordinary_income,
            capital_gain,
            amt_preference: Decimal::ZERO,
            net_profit: sale_proceeds - exercise_cost - taxes.total,
            taxes,
        }
    }
}
