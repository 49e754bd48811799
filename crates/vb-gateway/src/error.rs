//! Gateway error types and the HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use vb_core::{codes, CoreError};

/// Service-level failures (startup, bind, shutdown).
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid gateway configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A user-facing API error: HTTP status + stable code + message.
///
/// The body is always `{"error": message, "code": code}`.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// Path or query id that is not a valid integer.
    pub fn invalid_id() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_ID,
            "Valid ID is required",
        )
    }

    /// Request body that failed to parse as JSON.
    pub fn invalid_json() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            codes::INVALID_JSON,
            "Invalid JSON in request body",
        )
    }

    /// A field with the wrong JSON type on a strict endpoint.
    pub fn invalid_type(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::INVALID_TYPE, message)
    }

    pub fn invalid_field_type(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::INVALID_FIELD_TYPE, message)
    }

    pub fn invalid_fields(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, codes::INVALID_FIELDS, message)
    }

    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            codes::MISSING_REQUIRED_FIELD,
            message,
        )
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let status = match &err {
            CoreError::ProjectNotFound { .. } => StatusCode::NOT_FOUND,
            CoreError::ProjectLocked
            | CoreError::VotingDisabled
            | CoreError::EmergencyLockdown => StatusCode::FORBIDDEN,
            CoreError::DuplicateVote => StatusCode::CONFLICT,
            CoreError::SystemStateNotFound | CoreError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            CoreError::MissingVoterIdentifier
            | CoreError::MissingRequiredField { .. }
            | CoreError::InvalidTeamName
            | CoreError::InvalidVoteCount
            | CoreError::EmptyAction => StatusCode::BAD_REQUEST,
        };
        Self::new(status, err.code(), err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({
                "error": self.message,
                "code": self.code,
            })),
        )
            .into_response()
    }
}
