//! Messenger module
//!
//! Outbound messages published after a state change is committed.

mod bus;
mod message;

pub use bus::{DispatchError, InMemoryBus, MessageDispatch};
pub use message::{OutboundMessage, WbTokenMessage, WILDBERRIES_TRANSPORT};
