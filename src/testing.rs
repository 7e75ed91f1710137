//! Test doubles for the store and messenger seams

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{WbToken, WbTokenEvent};
use crate::messenger::{DispatchError, MessageDispatch, OutboundMessage};
use crate::store::{StoreError, TokenStore};

/// In-memory token store that counts every call
#[derive(Default)]
pub struct RecordingStore {
    events: Mutex<HashMap<Uuid, WbTokenEvent>>,
    tokens: Mutex<HashMap<Uuid, WbToken>>,
    queries: AtomicUsize,
    event_updates: AtomicUsize,
    token_deletes: AtomicUsize,
    fail_deletes: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose delete always reports a stale root
    pub fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Self::default()
        }
    }

    /// Seed a token with one event; returns (token, event)
    pub fn seed(&self, token: &str) -> (WbToken, WbTokenEvent) {
        let event = WbTokenEvent::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), token.to_string());
        let root = WbToken::new(event.main(), event.id());

        self.events.lock().unwrap().insert(event.id(), event.clone());
        self.tokens.lock().unwrap().insert(root.id(), root.clone());

        (root, event)
    }

    /// Seed an event with no root pointing at it
    pub fn seed_orphan_event(&self) -> WbTokenEvent {
        let event = WbTokenEvent::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), "orphan".to_string());
        self.events.lock().unwrap().insert(event.id(), event.clone());
        event
    }

    pub fn event(&self, id: Uuid) -> Option<WbTokenEvent> {
        self.events.lock().unwrap().get(&id).cloned()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    pub fn event_updates(&self) -> usize {
        self.event_updates.load(Ordering::SeqCst)
    }

    pub fn token_deletes(&self) -> usize {
        self.token_deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenStore for RecordingStore {
    async fn find_event(&self, event_id: Uuid) -> Result<Option<WbTokenEvent>, StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.events.lock().unwrap().get(&event_id).cloned())
    }

    async fn find_token_by_event(&self, event_id: Uuid) -> Result<Option<WbToken>, StoreError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .values()
            .find(|token| token.event() == event_id)
            .cloned())
    }

    async fn delete_token(&self, event: &WbTokenEvent, token: &WbToken) -> Result<(), StoreError> {
        if self.fail_deletes {
            return Err(StoreError::StaleToken {
                token_id: token.id(),
                event_id: token.event(),
            });
        }

        self.events.lock().unwrap().insert(event.id(), event.clone());
        self.event_updates.fetch_add(1, Ordering::SeqCst);

        self.tokens.lock().unwrap().remove(&token.id());
        self.token_deletes.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}

/// Dispatcher that keeps every message it is given
#[derive(Default)]
pub struct RecordingDispatcher {
    sent: Mutex<Vec<(String, OutboundMessage)>>,
    reject: bool,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher that rejects every message
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(String, OutboundMessage)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageDispatch for RecordingDispatcher {
    async fn dispatch(&self, message: OutboundMessage, transport: &str) -> Result<(), DispatchError> {
        if self.reject {
            return Err(DispatchError::Rejected {
                transport: transport.to_string(),
                reason: "broker unavailable".to_string(),
            });
        }

        self.sent.lock().unwrap().push((transport.to_string(), message));
        Ok(())
    }
}
