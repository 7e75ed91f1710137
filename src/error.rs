//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::handlers::{TokenDeleteError, TokenDeleteErrorKind};

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // Use case errors
    #[error(transparent)]
    TokenDelete(#[from] TokenDeleteError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }

            // Only the correlation id reaches the caller; specifics are in the log
            AppError::TokenDelete(err) => {
                let (status, code) = match err.kind() {
                    TokenDeleteErrorKind::Validation(_) => {
                        (StatusCode::BAD_REQUEST, "validation_failed")
                    }
                    TokenDeleteErrorKind::MissingEventId => {
                        (StatusCode::BAD_REQUEST, "missing_event_id")
                    }
                    TokenDeleteErrorKind::EventNotFound(_) => {
                        (StatusCode::NOT_FOUND, "event_not_found")
                    }
                    TokenDeleteErrorKind::AggregateNotFound(_) => {
                        (StatusCode::NOT_FOUND, "token_not_found")
                    }
                    TokenDeleteErrorKind::Storage(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, "storage_error")
                    }
                };
                (status, code, Some(err.correlation_id().to_string()))
            }
        };

        let error = match &self {
            AppError::TokenDelete(_) => "Token delete failed".to_string(),
            AppError::InvalidRequest(_) => self.to_string(),
        };

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
