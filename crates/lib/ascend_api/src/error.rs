//! Application error types.

use ascend_core::completion::CompletionError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// JSON body returned for every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// A request payload that could not be decoded. Treated as a server fault.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::Validation(m) => (StatusCode::BAD_REQUEST, "validation_error", m.as_str()),
            AppError::MalformedInput(m) => {
                warn!(error = %m, "malformed request payload");
                (StatusCode::INTERNAL_SERVER_ERROR, "malformed_input", m.as_str())
            }
            AppError::Upstream(m) => {
                warn!(error = %m, "upstream completion failed");
                (StatusCode::BAD_GATEWAY, "upstream_error", m.as_str())
            }
            AppError::Internal(m) => {
                warn!(error = %m, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                )
            }
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<CompletionError> for AppError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::Config(msg) => AppError::Internal(msg),
            other => AppError::Upstream(other.to_string()),
        }
    }
}
