//! Command definitions
//!
//! Commands represent intentions to change the system state.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =========================================================================
// Validation
// =========================================================================

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

/// Every violation found on a command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.violations.push(Violation {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Ok when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

// =========================================================================
// DeleteTokenCommand
// =========================================================================

/// Command to delete a Wildberries token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTokenCommand {
    /// Latest event of the token to delete
    pub event: Option<Uuid>,
    /// Profile issuing the delete
    pub profile: Uuid,
}

impl DeleteTokenCommand {
    pub fn new(event: Uuid, profile: Uuid) -> Self {
        Self {
            event: Some(event),
            profile,
        }
    }

    /// Structural checks on the command fields
    ///
    /// A missing event id is not a violation here; the handler reports it
    /// separately.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.profile.is_nil() {
            errors.add("profile", "must not be nil");
        }

        if self.event.is_some_and(|event| event.is_nil()) {
            errors.add("event", "must not be nil");
        }

        errors.into_result()
    }
}
