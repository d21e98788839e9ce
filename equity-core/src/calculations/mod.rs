//! Calculation components of the equity tax engine.
//!
//! Every component is a pure value-in value-out calculator constructed
//! over a borrowed [`TaxYearConfig`](crate::TaxYearConfig); nothing here
//! performs I/O or holds mutable state.

pub mod amt;
pub mod common;
pub mod grant_status;
pub mod iso_disposition;
pub mod ordinary_tax;
pub mod rates;
pub mod vesting;

pub use amt::{AmtHeadroom, AmtRoomReport, AmtRoomSolver};
pub use grant_status::status_for;
pub use iso_disposition::{IsoDispositionComparator, IsoSaleTerms};
pub use ordinary_tax::OrdinaryTaxSchedule;
pub use rates::{EffectiveRates, RateResolver};
pub use vesting::VestingScheduleGenerator;
