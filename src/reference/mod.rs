//! Marketplace reference module
//!
//! Typed decoders for Wildberries reference (configuration) responses.

mod error;
mod offer;

pub use error::ReferenceError;
pub use offer::{decode_offers, OfferCharacteristic};
