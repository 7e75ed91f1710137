//! Domain module
//!
//! Token aggregate entities and domain errors.

pub mod error;
pub mod token;

pub use error::DomainError;
pub use token::{ModifyAction, WbToken, WbTokenEvent};
