use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::tax_breakdown::TaxBreakdown;

/// One vesting tranche, fully annotated.
///
/// Vesting events are derived values: they are regenerated on every
/// query, never persisted, and never mutated after construction. The
/// generator guarantees ascending date order across the returned
/// schedule.
///
/// For ISO grants `gross_value` is the informational bargain spread and
/// `withholding`, `tax_gap`, and `amt_exposure` are always zero: an ISO
/// vest is not a taxable event; AMT exposure arises only from an actual
/// exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingEvent {
    pub date: NaiveDate,
    pub shares: Decimal,
    pub gross_value: Decimal,
    pub withholding: Decimal,
    pub withholding_rate: Decimal,
    pub net_shares: Decimal,
    pub net_value: Decimal,
    /// Shares notionally sold to fund withholding.
    ///
    /// `None` when no sale applies (ISO vests) or when the share count
    /// cannot be computed (zero share price).
    pub shares_sold_to_cover: Option<Decimal>,
    /// Liability not covered by withholding: max(0, liability − withholding).
    pub tax_gap: Decimal,
    /// Always zero at vest; kept on the event so schedules and exercises
    /// share one reporting shape.
    pub amt_exposure: Decimal,
    pub taxes: TaxBreakdown,
    /// Whether the event date is strictly before the evaluation date.
    /// Recomputed on every generation, never stored.
    pub is_past: bool,
}
