//! wb_tokens Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod domain;
pub mod handlers;
pub mod messenger;
pub mod reference;
pub mod store;

pub mod config;
pub mod db;
mod error;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{Config, LogFormat};
pub use domain::{DomainError, ModifyAction, WbToken, WbTokenEvent};
pub use error::AppError;
pub use handlers::{DeleteTokenCommand, DeleteTokenHandler, TokenDeleteError, TokenDeleteErrorKind};
pub use reference::{decode_offers, OfferCharacteristic, ReferenceError};
