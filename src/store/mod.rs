//! Token Store module
//!
//! Persistence layer for the Wildberries token aggregate.
//! Roots and events live in PostgreSQL.

mod error;
mod repository;

pub use error::StoreError;
pub use repository::{PgTokenStore, TokenStore};
