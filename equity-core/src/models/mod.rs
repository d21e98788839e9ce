mod client;
mod filing_status;
mod grant;
mod grant_status;
mod iso_scenario;
mod planned_exercise;
mod tax_breakdown;
mod tax_year_config;
mod vesting_event;

pub use client::Client;
pub use filing_status::FilingStatusCode;
pub use grant::{Grant, GrantKind, VestingVariant};
pub use grant_status::GrantStatus;
pub use iso_scenario::{DispositionKind, IsoComparison, IsoScenario};
pub use planned_exercise::PlannedExercise;
pub use tax_breakdown::TaxBreakdown;
pub use tax_year_config::{AmtParameters, OrdinaryBracket, StateRateTable, TaxYearConfig};
pub use vesting_event::VestingEvent;
