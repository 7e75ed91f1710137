//! API Routes
//!
//! HTTP endpoint definitions.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::delete,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::handlers::{DeleteTokenCommand, DeleteTokenHandler};

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub delete_token: Arc<DeleteTokenHandler>,
}

impl AppState {
    pub fn new(delete_token: DeleteTokenHandler) -> Self {
        Self {
            delete_token: Arc::new(delete_token),
        }
    }
}

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Deserialize)]
pub struct DeleteTokenRequest {
    pub profile: Uuid,
}

#[derive(Debug, Serialize)]
pub struct DeleteTokenResponse {
    pub id: Uuid,
    pub event: Uuid,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new().route("/tokens/:event_id", delete(delete_token))
}

// =========================================================================
// DELETE /tokens/:event_id
// =========================================================================

/// Delete the token whose latest event is `event_id`
async fn delete_token(
    State(state): State<AppState>,
    event_id: Result<Path<Uuid>, PathRejection>,
    request: Result<Json<DeleteTokenRequest>, JsonRejection>,
) -> Result<Json<DeleteTokenResponse>, AppError> {
    let Path(event_id) = event_id.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let Json(request) = request.map_err(|e| AppError::InvalidRequest(e.body_text()))?;

    let command = DeleteTokenCommand::new(event_id, request.profile);

    let token = state.delete_token.handle(command).await?;

    Ok(Json(DeleteTokenResponse {
        id: token.id(),
        event: token.event(),
    }))
}
