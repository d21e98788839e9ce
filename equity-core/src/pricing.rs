//! Stock price lookup seam.
//!
//! The engine never fetches market prices; callers use an implementation
//! of [`PriceLookup`] to pre-populate a grant's current price before
//! querying the engine.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A quoted price for a ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub price: Decimal,
    pub currency: String,
    pub source_url: Option<String>,
}

#[derive(Debug, Error)]
pub enum PriceLookupError {
    #[error("unknown ticker {0}")]
    UnknownTicker(String),

    #[error("price source error: {0}")]
    Upstream(String),
}

#[async_trait]
pub trait PriceLookup: Send + Sync {
    async fn quote(&self, ticker: &str) -> Result<PriceQuote, PriceLookupError>;
}
