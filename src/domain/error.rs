//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

/// Domain-specific errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Stored modify action is not one we know
    #[error("Unknown modify action: {0}")]
    UnknownModifyAction(String),
}
