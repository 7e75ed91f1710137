//! Command Handlers module
//!
//! Command handlers that orchestrate the token use cases.
//! Each handler coordinates the token store and the messenger.

mod commands;
mod delete_token_handler;


pub use commands::*;
pub use delete_token_handler::{DeleteTokenHandler, TokenDeleteError, TokenDeleteErrorKind};
