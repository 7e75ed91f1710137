//! Token Store Errors
//!
//! Error types for token persistence.

use uuid::Uuid;

/// Errors that can occur in the token store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Root row changed or vanished between load and delete
    #[error("Token {token_id} no longer points at event {event_id}")]
    StaleToken { token_id: Uuid, event_id: Uuid },

    /// Event row to update does not exist
    #[error("Token event not found: {0}")]
    EventNotFound(Uuid),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored row could not be mapped to a domain value
    #[error("Invalid row data: {0}")]
    InvalidRow(String),
}

impl StoreError {
    /// Check if this error is a concurrent modification
    pub fn is_stale(&self) -> bool {
        matches!(self, StoreError::StaleToken { .. })
    }
}

impl From<crate::domain::DomainError> for StoreError {
    fn from(err: crate::domain::DomainError) -> Self {
        StoreError::InvalidRow(err.to_string())
    }
}
