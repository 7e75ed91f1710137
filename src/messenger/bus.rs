//! In-process message bus
//!
//! One `tokio::sync::broadcast` channel per registered transport. Every
//! subscriber of a transport receives every message dispatched to it.
//! Delivery is best effort: a lagging subscriber loses the oldest messages.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::broadcast;

use super::{OutboundMessage, WILDBERRIES_TRANSPORT};

/// Errors raised while dispatching a message
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Unknown transport: {0}")]
    UnknownTransport(String),

    #[error("Transport {transport} rejected message: {reason}")]
    Rejected { transport: String, reason: String },
}

/// Seam for sending messages onto a named transport
#[async_trait]
pub trait MessageDispatch: Send + Sync {
    async fn dispatch(&self, message: OutboundMessage, transport: &str) -> Result<(), DispatchError>;
}

/// Broadcast bus over a fixed set of transports
#[derive(Debug, Clone)]
pub struct InMemoryBus {
    transports: HashMap<String, broadcast::Sender<OutboundMessage>>,
}

impl InMemoryBus {
    /// Create a bus with the given transports
    pub fn new<I, S>(capacity: usize, transports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let transports = transports
            .into_iter()
            .map(|name| {
                let (sender, _) = broadcast::channel(capacity.max(1));
                (name.into(), sender)
            })
            .collect();

        Self { transports }
    }

    /// Create a bus carrying the `wildberries` transport
    pub fn wildberries(capacity: usize) -> Self {
        Self::new(capacity, [WILDBERRIES_TRANSPORT])
    }

    /// Subscribe to a transport
    pub fn subscribe(&self, transport: &str) -> Result<broadcast::Receiver<OutboundMessage>, DispatchError> {
        self.transports
            .get(transport)
            .map(broadcast::Sender::subscribe)
            .ok_or_else(|| DispatchError::UnknownTransport(transport.to_string()))
    }
}

#[async_trait]
impl MessageDispatch for InMemoryBus {
    async fn dispatch(&self, message: OutboundMessage, transport: &str) -> Result<(), DispatchError> {
        let sender = self
            .transports
            .get(transport)
            .ok_or_else(|| DispatchError::UnknownTransport(transport.to_string()))?;

        let message_type = message.message_type();

        // send only fails when nobody is listening
        match sender.send(message) {
            Ok(receivers) => {
                tracing::debug!(transport, message_type, receivers, "Message dispatched");
            }
            Err(_) => {
                tracing::debug!(transport, message_type, "Message dispatched without subscribers");
            }
        }

        Ok(())
    }
}
