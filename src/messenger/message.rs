//! Outbound messages

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Transport for Wildberries integration messages
pub const WILDBERRIES_TRANSPORT: &str = "wildberries";

/// Notification that a token aggregate changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WbTokenMessage {
    /// Token (root) id
    pub id: Uuid,
    /// Event the root pointed at
    pub event: Uuid,
    /// Event named by the command
    pub last: Uuid,
}

impl WbTokenMessage {
    pub fn new(id: Uuid, event: Uuid, last: Uuid) -> Self {
        Self { id, event, last }
    }
}

/// Every message the service puts on a transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutboundMessage {
    WbToken(WbTokenMessage),
}

impl OutboundMessage {
    /// Get the message type as a string
    pub fn message_type(&self) -> &'static str {
        match self {
            OutboundMessage::WbToken(_) => "WbTokenMessage",
        }
    }
}

impl From<WbTokenMessage> for OutboundMessage {
    fn from(message: WbTokenMessage) -> Self {
        OutboundMessage::WbToken(message)
    }
}
