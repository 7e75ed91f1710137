//! Delete Token Handler
//!
//! Removes a Wildberries token aggregate root and notifies the
//! `wildberries` transport.

use std::panic::Location;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::WbToken;
use crate::messenger::{MessageDispatch, WbTokenMessage, WILDBERRIES_TRANSPORT};
use crate::store::{StoreError, TokenStore};

use super::commands::{DeleteTokenCommand, ValidationErrors};

// =========================================================================
// TokenDeleteError
// =========================================================================

/// Why a delete was refused
#[derive(Debug, thiserror::Error)]
pub enum TokenDeleteErrorKind {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Not found event id in command")]
    MissingEventId,

    #[error("Token event not found: {0}")]
    EventNotFound(Uuid),

    #[error("Token not found by event: {0}")]
    AggregateNotFound(Uuid),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Failed delete, tagged with the correlation id written to the log
#[derive(Debug, thiserror::Error)]
#[error("{kind} (correlation id {correlation_id})")]
pub struct TokenDeleteError {
    correlation_id: String,
    kind: TokenDeleteErrorKind,
}

impl TokenDeleteError {
    /// Log the failure under a fresh correlation id
    #[track_caller]
    fn logged(kind: TokenDeleteErrorKind) -> Self {
        let correlation_id = new_correlation_id();
        tracing::error!(
            correlation_id = %correlation_id,
            location = %Location::caller(),
            "{}: {}",
            correlation_id,
            kind
        );

        Self {
            correlation_id,
            kind,
        }
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn kind(&self) -> &TokenDeleteErrorKind {
        &self.kind
    }
}

fn new_correlation_id() -> String {
    Uuid::new_v4().simple().to_string()
}

// =========================================================================
// DeleteTokenHandler
// =========================================================================

/// Handler for token deletion
#[derive(Clone)]
pub struct DeleteTokenHandler {
    store: Arc<dyn TokenStore>,
    dispatcher: Arc<dyn MessageDispatch>,
}

impl DeleteTokenHandler {
    pub fn new(store: Arc<dyn TokenStore>, dispatcher: Arc<dyn MessageDispatch>) -> Self {
        Self { store, dispatcher }
    }

    /// Execute the delete token command
    pub async fn handle(&self, command: DeleteTokenCommand) -> Result<WbToken, TokenDeleteError> {
        command
            .validate()
            .map_err(|e| TokenDeleteError::logged(TokenDeleteErrorKind::Validation(e)))?;

        let event_id = command
            .event
            .ok_or_else(|| TokenDeleteError::logged(TokenDeleteErrorKind::MissingEventId))?;

        let mut event = self
            .store
            .find_event(event_id)
            .await
            .map_err(|e| TokenDeleteError::logged(e.into()))?
            .ok_or_else(|| TokenDeleteError::logged(TokenDeleteErrorKind::EventNotFound(event_id)))?;

        let token = self
            .store
            .find_token_by_event(event_id)
            .await
            .map_err(|e| TokenDeleteError::logged(e.into()))?
            .ok_or_else(|| {
                TokenDeleteError::logged(TokenDeleteErrorKind::AggregateNotFound(event_id))
            })?;

        event.apply_delete(command.profile);

        // Event update and root removal commit together
        self.store
            .delete_token(&event, &token)
            .await
            .map_err(|e| TokenDeleteError::logged(e.into()))?;

        tracing::info!(token_id = %token.id(), event_id = %event_id, "Wildberries token deleted");

        // Committed already; a lost notification does not undo the delete
        let message = WbTokenMessage::new(token.id(), token.event(), event_id);
        if let Err(e) = self
            .dispatcher
            .dispatch(message.into(), WILDBERRIES_TRANSPORT)
            .await
        {
            let correlation_id = new_correlation_id();
            tracing::error!(
                correlation_id = %correlation_id,
                token_id = %token.id(),
                "{}: {}",
                correlation_id,
                e
            );
        }

        Ok(token)
    }
}
