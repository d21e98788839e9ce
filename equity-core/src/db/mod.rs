pub mod repository;

pub use repository::{ClientRepository, RepositoryError};
