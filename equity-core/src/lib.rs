//! Equity compensation tax modeling engine.
//!
//! Pure, deterministic computations that turn a client's tax profile and
//! equity grants into vesting schedules with withholding analysis, AMT
//! room estimates, and qualified/disqualified ISO sale comparisons.
//! Persistence and price lookup are seams ([`ClientRepository`],
//! [`pricing::PriceLookup`]) implemented by callers.

pub mod calculations;
pub mod db;
pub mod engine;
pub mod error;
pub mod models;
pub mod pricing;

pub use calculations::{AmtHeadroom, AmtRoomReport, EffectiveRates};
pub use db::repository::{ClientRepository, RepositoryError};
pub use engine::EquityTaxEngine;
pub use error::EngineError;
pub use models::*;
