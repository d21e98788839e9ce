use async_trait::async_trait;
use thiserror::Error;

use crate::models::Client;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Persistence seam for the client aggregate.
///
/// The engine itself never persists anything; callers load a [`Client`]
/// (with nested grants and planned exercises), run queries against the
/// engine, and save the aggregate back through an implementation of this
/// trait.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn get_client(&self, id: i64) -> Result<Client, RepositoryError>;

    async fn list_clients(&self) -> Result<Vec<Client>, RepositoryError>;

    async fn save_client(&self, client: &Client) -> Result<(), RepositoryError>;

    async fn delete_client(&self, id: i64) -> Result<(), RepositoryError>;
}
