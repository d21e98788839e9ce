//! Engine facade over the calculation components.
//!
//! [`EquityTaxEngine`] owns a [`TaxYearConfig`] and exposes the pure
//! query functions consumed by the presentation layer. Every method is a
//! deterministic function of its arguments; the evaluation instant is an
//! explicit `as_of` date supplied by the caller, never a clock read.
//! Invocations are independent and freely re-orderable; there is no
//! shared mutable state to coordinate.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calculations::amt::{AmtRoomReport, AmtRoomSolver};
use crate::calculations::grant_status::status_for;
use crate::calculations::iso_disposition::{IsoDispositionComparator, IsoSaleTerms};
use crate::calculations::rates::{EffectiveRates, RateResolver};
use crate::calculations::vesting::VestingScheduleGenerator;
use crate::error::EngineError;
use crate::models::{
    Client, DispositionKind, Grant, GrantStatus, IsoComparison, IsoScenario, PlannedExercise,
    TaxYearConfig, VestingEvent,
};

/// The equity compensation tax engine.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use equity_core::{Client, EquityTaxEngine, FilingStatusCode};
///
/// let engine = EquityTaxEngine::projected();
/// let client = Client {
///     id: 1,
///     name: "Example".to_string(),
///     filing_status: FilingStatusCode::Single,
///     federal_bracket: dec!(35),
///     state: "CA".to_string(),
///     annual_income: None,
///     state_rate_override: None,
///     ltcg_rate_override: None,
///     grants: Vec::new(),
///     planned_exercises: Vec::new(),
/// };
///
/// let rates = engine.effective_rates(&client).unwrap();
///
/// assert_eq!(rates.state_rate, dec!(0.144));
/// assert_eq!(rates.fed_ltcg_rate, dec!(0.20));
/// ```
#[derive(Debug, Clone)]
pub struct EquityTaxEngine {
    config: TaxYearConfig,
}

impl EquityTaxEngine {
    /// Builds an engine over an explicit tax-year rule set.
    pub fn new(config: TaxYearConfig) -> Self {
        Self { config }
    }

    /// Builds an engine over the shipped projected rule set.
    pub fn projected() -> Self {
        Self::new(TaxYearConfig::projected())
    }

    pub fn config(&self) -> &TaxYearConfig {
        &self.config
    }

    /// Resolves the client's effective state and LTCG rates.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the client's profile fails validation.
    pub fn effective_rates(
        &self,
        client: &Client,
    ) -> Result<EffectiveRates, EngineError> {
        client.validate()?;
        Ok(RateResolver::new(&self.config).resolve(client))
    }

    /// Expands a grant into its annotated vesting schedule, sorted
    /// ascending by date. See
    /// [`VestingScheduleGenerator`](crate::calculations::VestingScheduleGenerator).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the grant or client fails validation.
    pub fn generate_vesting_schedule(
        &self,
        grant: &Grant,
        client: &Client,
        as_of: NaiveDate,
        simulate_sell_all: bool,
    ) -> Result<Vec<VestingEvent>, EngineError> {
        VestingScheduleGenerator::new(&self.config).generate(grant, client, as_of, simulate_sell_all)
    }

    /// Derives vested/unvested/exercised/available counts for a grant.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the grant fails validation.
    pub fn grant_status(
        &self,
        grant: &Grant,
        planned_exercises: &[PlannedExercise],
        as_of: NaiveDate,
    ) -> Result<GrantStatus, EngineError> {
        status_for(grant, planned_exercises, as_of)
    }

    /// Estimates the client's AMT room for the calendar year of `as_of`.
    /// See [`AmtRoomSolver`](crate::calculations::AmtRoomSolver).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the client or an RSU grant fails
    /// validation.
    pub fn amt_room(
        &self,
        client: &Client,
        as_of: NaiveDate,
    ) -> Result<AmtRoomReport, EngineError> {
        AmtRoomSolver::new(&self.config).solve(client, as_of)
    }

    /// Computes a single ISO disposition scenario.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] on invalid sale terms or client profile.
    pub fn iso_scenario(
        &self,
        shares: Decimal,
        strike_price: Decimal,
        fmv_at_exercise: Decimal,
        sale_price: Decimal,
        client: &Client,
        disposition: DispositionKind,
    ) -> Result<IsoScenario, EngineError> {
        IsoDispositionComparator::new(&self.config).scenario(
            IsoSaleTerms {
                shares,
                strike_price,
                fmv_at_exercise,
                sale_price,
            },
            client,
            disposition,
        )
    }

    /// Computes the qualified and disqualified scenarios for one sale.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] on invalid sale terms or client profile.
    pub fn compare_iso_dispositions(
        &self,
        shares: Decimal,
        strike_price: Decimal,
        fmv_at_exercise: Decimal,
        sale_price: Decimal,
        client: &Client,
    ) -> Result<IsoComparison, EngineError> {
        IsoDispositionComparator::new(&self.config).compare(
            IsoSaleTerms {
                shares,
                strike_price,
                fmv_at_exercise,
                sale_price,
            },
            client,
        )
    }
}
