//! Alternative Minimum Tax room estimation.
//!
//! Estimates how much additional ISO bargain-element spread a client can
//! realize in the evaluation year before Tentative Minimum Tax exceeds
//! regular tax, i.e. before AMT becomes the binding tax.
//!
//! # Worksheet Structure
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Projected RSU income: gross vesting value landing in the evaluation year |
//! | 2    | Total gross income: base income (estimate or default) + step 1 |
//! | 3    | Estimated state tax (SALT) = total gross × effective state rate |
//! | 4    | Effective deduction: greater of SALT estimate and standard deduction |
//! | 5    | Personal exemptions: per-person amount × persons on the return |
//! | 6    | Regular tax on max(0, total gross − deduction − exemptions) |
//! | 7    | Search spread upward in fixed steps: AMTI = total gross + spread |
//! |      | (SALT, standard deduction, and exemptions are add-backs; the   |
//! |      | AMT base starts from gross, so nothing is re-deducted)          |
//! | 8    | AMT exemption, phased out at 25¢/$ above the threshold |
//! | 9    | Two-tier TMT (26% / 28%); stop at the first spread where TMT > regular tax |
//!
//! The search is bounded: if no breakeven is found before the cap, the
//! result is an explicit [`AmtHeadroom::NoBreakevenFound`] rather than a
//! near-arbitrary capped dollar figure.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{max, non_negative, round_half_up};
use crate::calculations::ordinary_tax::OrdinaryTaxSchedule;
use crate::calculations::rates::RateResolver;
use crate::calculations::vesting::VestingScheduleGenerator;
use crate::error::EngineError;
use crate::models::{Client, GrantKind, TaxYearConfig};

/// The solver's answer: either a concrete dollar room or an explicit
/// indeterminate marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmtHeadroom {
    /// Additional ISO spread realizable before AMT binds: the last
    /// searched spread confirmed still safe.
    Room(Decimal),
    /// The search cap was exhausted without TMT overtaking regular tax.
    /// Treat as "indeterminate / effectively unlimited", not as a dollar
    /// figure.
    NoBreakevenFound { searched_up_to: Decimal },
}

impl AmtHeadroom {
    /// The concrete room, when one was found.
    pub fn room(&self) -> Option<Decimal> {
        match self {
            Self::Room(room) => Some(*room),
            Self::NoBreakevenFound { .. } => None,
        }
    }
}

/// Full AMT room report for a client at an evaluation date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmtRoomReport {
    pub headroom: AmtHeadroom,
    pub regular_tax: Decimal,
    pub projected_rsu_income: Decimal,
    pub base_income: Decimal,
    pub standard_deduction: Decimal,
    pub personal_exemptions: Decimal,
    pub effective_deduction: Decimal,
    pub is_itemizing: bool,
    pub estimated_state_tax: Decimal,
}

/// Bounded iterative AMT breakeven search.
#[derive(Debug, Clone)]
pub struct AmtRoomSolver<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> AmtRoomSolver<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Estimates the client's AMT room for the calendar year of `as_of`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the client or one of their RSU grants
    /// fails validation, or if the bracket table is empty.
    pub fn solve(
        &self,
        client: &Client,
        as_of: NaiveDate,
    ) -> Result<AmtRoomReport, EngineError> {
        client.validate()?;

        let rates = RateResolver::new(self.config).resolve(client);
        let projected_rsu_income = self.projected_rsu_income(client, as_of)?;
        let base_income = client
            .annual_income
            .unwrap_or(self.config.default_annual_income);
        let total_gross_income = base_income + projected_rsu_income;

        let estimated_state_tax = round_half_up(total_gross_income * rates.state_rate);
        let standard_deduction = self.config.standard_deduction(client.filing_status);
        let is_itemizing = estimated_state_tax > standard_deduction;
        let effective_deduction = max(estimated_state_tax, standard_deduction);

        let personal_exemptions =
            self.config.personal_exemption * Decimal::from(client.filing_status.person_count());

        let regular_taxable_income =
            non_negative(total_gross_income - effective_deduction - personal_exemptions);
        let regular_tax = OrdinaryTaxSchedule::new(self.config)
            .tax_for(regular_taxable_income, client.filing_status)?;

        let headroom = self.search_breakeven(client, total_gross_income, regular_tax);

        Ok(AmtRoomReport {
            headroom,
            regular_tax,
            projected_rsu_income,
            base_income,
            standard_deduction,
            personal_exemptions,
            effective_deduction,
            is_itemizing,
            estimated_state_tax,
        })
    }

    /// Gross RSU vesting value landing in the evaluation year.
    fn projected_rsu_income(
        &self,
        client: &Client,
        as_of: NaiveDate,
    ) -> Result<Decimal, EngineError> {
        let generator = VestingScheduleGenerator::new(self.config);
        let mut projected = Decimal::ZERO;
        for grant in client.grants.iter().filter(|g| g.kind == GrantKind::Rsu) {
            let schedule = generator.generate(grant, client, as_of, false)?;
            projected += schedule
                .iter()
                .filter(|event| event.date.year() == as_of.year())
                .map(|event| event.gross_value)
                .sum::<Decimal>();
        }
        Ok(projected)
    }

    /// Steps the spread upward until TMT first exceeds regular tax.
    fn search_breakeven(
        &self,
        client: &Client,
        total_gross_income: Decimal,
        regular_tax: Decimal,
    ) -> AmtHeadroom {
        let amt = &self.config.amt;
        let exemption_base = amt.exemption(client.filing_status);
        let phaseout_threshold = amt.phaseout_threshold(client.filing_status);

        let mut spread = Decimal::ZERO;
        while spread <= amt.search_cap {
            // State tax, standard deduction, and personal exemptions are
            // AMT add-backs; AMTI starts from gross income.
            let amti = total_gross_income + spread;
            let phaseout =
                non_negative(amti - phaseout_threshold) * amt.exemption_phaseout_rate;
            let exemption = non_negative(exemption_base - phaseout);
            let amt_base = non_negative(amti - exemption);
            let tmt = self.tentative_minimum_tax(amt_base);

            if tmt > regular_tax {
                let room = non_negative(spread - amt.search_step);
                debug!(%spread, %room, "AMT breakeven found");
                return AmtHeadroom::Room(room);
            }
            spread += amt.search_step;
        }

        warn!(
            cap = %amt.search_cap,
            "AMT breakeven search exhausted its cap; room is indeterminate"
        );
        AmtHeadroom::NoBreakevenFound {
            searched_up_to: amt.search_cap,
        }
    }

    fn tentative_minimum_tax(
        &self,
        amt_base: Decimal,
    ) -> Decimal {
        let amt = &self.config.amt;
        if amt_base <= amt.rate_threshold {
            amt_base * amt.low_rate
        } else {
            amt.rate_threshold * amt.low_rate + (amt_base - amt.rate_threshold) * amt.high_rate
        }
    }
}
