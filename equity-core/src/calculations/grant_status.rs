//! Share-count status derivation for a grant.
//!
//! Partitions the grant's tranche schedule at the evaluation date and
//! nets out planned exercises. Share counts do not depend on the
//! client's tax profile, so this works from raw tranches rather than
//! priced vesting events.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calculations::common::non_negative;
use crate::calculations::vesting::tranches;
use crate::error::EngineError;
use crate::models::{Grant, GrantStatus, PlannedExercise};

/// Derives vested/unvested/exercised/available counts for a grant.
///
/// Tranches strictly before `as_of` count as vested, consistent with the
/// `is_past` flag on generated vesting events. `available` is clamped at
/// zero: a caller that recorded exercises beyond tracked vesting made an
/// error, but the status report stays well-formed.
///
/// # Errors
///
/// Returns [`EngineError`] if the grant fails validation or on calendar
/// overflow.
pub fn status_for(
    grant: &Grant,
    planned_exercises: &[PlannedExercise],
    as_of: NaiveDate,
) -> Result<GrantStatus, EngineError> {
    grant.validate()?;

    let vested: Decimal = tranches(grant)?
        .into_iter()
        .filter(|(date, _)| *date < as_of)
        .map(|(_, shares)| shares)
        .sum();

    let exercised: Decimal = planned_exercises
        .iter()
        .filter(|exercise| exercise.grant_id == grant.id)
        .map(|exercise| exercise.shares)
        .sum();

    Ok(GrantStatus {
        total: grant.total_shares,
        vested,
        unvested: grant.total_shares - vested,
        exercised,
        available: non_negative(vested - exercised),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{GrantKind, VestingVariant};

    fn iso_grant() -> Grant {
        Grant {
            id: 9,
            kind: GrantKind::Iso,
            ticker: "ACME".to_string(),
            current_price: dec!(50),
            strike_price: Some(dec!(10)),
            grant_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            total_shares: dec!(1600),
            vesting_variant: VestingVariant::Quarterly,
            withholding_rate: None,
        }
    }

    fn exercise(grant_id: i64, shares: Decimal) -> PlannedExercise {
        PlannedExercise {
            grant_id,
            exercise_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            shares,
            strike_price: dec!(10),
            fmv_at_exercise: dec!(50),
            cash_cost: shares * dec!(10),
            amt_exposure: dec!(0),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn nothing_vested_before_first_tranche() {
        let status = status_for(&iso_grant(), &[], date(2024, 4, 15)).unwrap();

        // The first tranche lands exactly on the evaluation date and is
        // not yet vested (strictly-before partition).
        assert_eq!(status.vested, dec!(0));
        assert_eq!(status.unvested, dec!(1600));
        assert_eq!(status.available, dec!(0));
    }

    #[test]
    fn partitions_vested_and_unvested_at_evaluation_date() {
        // Six quarterly tranches are strictly before mid-2025.
        let status = status_for(&iso_grant(), &[], date(2025, 8, 1)).unwrap();

        assert_eq!(status.vested, dec!(600));
        assert_eq!(status.unvested, dec!(1000));
        assert_eq!(status.exercised, dec!(0));
        assert_eq!(status.available, dec!(600));
    }

    #[test]
    fn exercises_reduce_available_shares() {
        let exercises = vec![exercise(9, dec!(200)), exercise(9, dec!(150))];

        let status = status_for(&iso_grant(), &exercises, date(2025, 8, 1)).unwrap();

        assert_eq!(status.exercised, dec!(350));
        assert_eq!(status.available, dec!(250));
    }

    #[test]
    fn exercises_for_other_grants_are_ignored() {
        let exercises = vec![exercise(9, dec!(200)), exercise(8, dec!(9999))];

        let status = status_for(&iso_grant(), &exercises, date(2025, 8, 1)).unwrap();

        assert_eq!(status.exercised, dec!(200));
    }

    #[test]
    fn available_clamps_at_zero_when_over_exercised() {
        let exercises = vec![exercise(9, dec!(5000))];

        let status = status_for(&iso_grant(), &exercises, date(2025, 8, 1)).unwrap();

        assert_eq!(status.exercised, dec!(5000));
        assert_eq!(status.available, dec!(0));
    }

    #[test]
    fn fully_vested_after_final_tranche() {
        let status = status_for(&iso_grant(), &[], date(2028, 2, 1)).unwrap();

        assert_eq!(status.vested, dec!(1600));
        assert_eq!(status.unvested, dec!(0));
    }
}
