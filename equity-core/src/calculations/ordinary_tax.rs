//! Progressive federal ordinary income tax.
//!
//! Walks the ordered bracket table for a filing status, accumulating
//! `(min(income, upper) − lower) × rate` for every bracket whose lower
//! bound lies below the income. The result is zero for non-positive
//! income and monotonically non-decreasing in income.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;
use crate::error::EngineError;
use crate::models::{FilingStatusCode, TaxYearConfig};

/// Marginal federal ordinary income tax over an injected bracket table.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use equity_core::calculations::OrdinaryTaxSchedule;
/// use equity_core::{FilingStatusCode, TaxYearConfig};
///
/// let config = TaxYearConfig::projected();
/// let schedule = OrdinaryTaxSchedule::new(&config);
///
/// let tax = schedule.tax_for(dec!(85000), FilingStatusCode::Single).unwrap();
///
/// // 11925 × 10% + 36550 × 12% + 36525 × 22%
/// assert_eq!(tax, dec!(13614.00));
/// ```
#[derive(Debug, Clone)]
pub struct OrdinaryTaxSchedule<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> OrdinaryTaxSchedule<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Computes the marginal tax owed on `taxable_income`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoTaxBrackets`] when the configuration has
    /// no brackets for the filing status. Never errors on any income
    /// value.
    pub fn tax_for(
        &self,
        taxable_income: Decimal,
        status: FilingStatusCode,
    ) -> Result<Decimal, EngineError> {
        let brackets = self.config.ordinary_brackets(status);
        if brackets.is_empty() {
            return Err(EngineError::NoTaxBrackets);
        }
        if taxable_income <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let mut tax = Decimal::ZERO;
        let mut lower = Decimal::ZERO;
        for bracket in brackets {
            let capped = match bracket.upper_limit {
                Some(upper) => taxable_income.min(upper),
                None => taxable_income,
            };
            tax += (capped - lower) * bracket.rate;

            match bracket.upper_limit {
                Some(upper) if taxable_income > upper => lower = upper,
                _ => break,
            }
        }

        Ok(round_half_up(tax))
    }
}
