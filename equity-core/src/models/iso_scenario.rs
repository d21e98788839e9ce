use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::tax_breakdown::TaxBreakdown;

/// Holding-period outcome of an ISO sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispositionKind {
    /// Held ≥ 1 year past exercise and ≥ 2 years past grant; the entire
    /// gain over the exercise cost is long-term capital gain.
    Qualified,
    /// Sold before the holding requirements were met; the bargain
    /// element converts to ordinary income.
    Disqualified,
}

/// A fully computed ISO sale scenario.
///
/// Derived comparison record; two instances (qualified / disqualified)
/// are always produced together as an [`IsoComparison`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsoScenario {
    pub disposition: DispositionKind,
    pub shares: Decimal,
    pub fmv_at_exercise: Decimal,
    pub sale_price: Decimal,
    pub exercise_cost: Decimal,
    pub sale_proceeds: Decimal,
    pub ordinary_income: Decimal,
    pub capital_gain: Decimal,
    /// AMT preference item generated in the exercise year. Tracked for
    /// disclosure on the qualified path; a disqualifying disposition in
    /// the same tax year eliminates it.
    pub amt_preference: Decimal,
    pub taxes: TaxBreakdown,
    /// Sale proceeds − exercise cost − total tax.
    pub net_profit: Decimal,
}

/// The qualified and disqualified scenarios for one what-if query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsoComparison {
    pub qualified: IsoScenario,
    pub disqualified: IsoScenario,
}
