use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{max, round_half_up};
use crate::error::EngineError;
use crate::models::grant::Grant;

/// A recorded decision to exercise shares of an ISO grant.
///
/// Immutable once created; the engine never updates or deletes planned
/// exercises; their lifecycle belongs to the caller. `amt_exposure` is
/// the bargain element when the shares are held past year end, and zero
/// for a same-year disqualifying disposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedExercise {
    pub grant_id: i64,
    pub exercise_date: NaiveDate,
    pub shares: Decimal,
    pub strike_price: Decimal,
    pub fmv_at_exercise: Decimal,
    /// Cash needed to exercise: shares × strike.
    pub cash_cost: Decimal,
    pub amt_exposure: Decimal,
}

impl PlannedExercise {
    /// Plans an exercise of `shares` of `grant` on `exercise_date`.
    ///
    /// The grant's current price is captured as the FMV at exercise.
    /// When `held_through_year_end` is false the exercise is treated as a
    /// same-year disqualifying disposition and carries no AMT exposure.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the grant fails validation, is not an
    /// ISO grant, or `shares` is not positive.
    pub fn plan(
        grant: &Grant,
        shares: Decimal,
        exercise_date: NaiveDate,
        held_through_year_end: bool,
    ) -> Result<Self, EngineError> {
        grant.validate()?;
        let strike = grant.strike()?;
        if shares <= Decimal::ZERO {
            return Err(EngineError::InvalidShareCount(shares));
        }

        let fmv = grant.current_price;
        let bargain_element = max((fmv - strike) * shares, Decimal::ZERO);
        let amt_exposure = if held_through_year_end {
            round_half_up(bargain_element)
        } else {
            Decimal::ZERO
        };

        Ok(Self {
            grant_id: grant.id,
            exercise_date,
            shares,
            strike_price: strike,
            fmv_at_exercise: fmv,
            cash_cost: round_half_up(shares * strike),
            amt_exposure,
        })
    }
}
