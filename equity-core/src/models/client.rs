use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::filing_status::FilingStatusCode;
use crate::models::grant::Grant;
use crate::models::planned_exercise::PlannedExercise;

/// A client's tax profile and owned equity positions.
///
/// The rate overrides are fractions (0.093, not 9.3) and, when present,
/// always win over table lookups, including an explicit `Some(0)`,
/// which is a valid override and not "unset".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub name: String,
    pub filing_status: FilingStatusCode,
    /// Marginal federal ordinary bracket, in percent (0–100).
    pub federal_bracket: Decimal,
    /// Two-letter state code; unknown codes resolve to the fallback rate.
    pub state: String,
    pub annual_income: Option<Decimal>,
    pub state_rate_override: Option<Decimal>,
    pub ltcg_rate_override: Option<Decimal>,
    pub grants: Vec<Grant>,
    pub planned_exercises: Vec<PlannedExercise>,
}

impl Client {
    /// Validates the client's tax profile.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::BracketOutOfRange`] if the federal bracket
    /// is outside [0, 100] percent.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.federal_bracket < Decimal::ZERO || self.federal_bracket > Decimal::ONE_HUNDRED {
            return Err(EngineError::BracketOutOfRange(self.federal_bracket));
        }
        Ok(())
    }

    /// Planned exercises recorded against a specific grant.
    pub fn exercises_for(&self, grant_id: i64) -> impl Iterator<Item = &PlannedExercise> {
        self.planned_exercises
            .iter()
            .filter(move |exercise| exercise.grant_id == grant_id)
    }
}
