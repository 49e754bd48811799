//! Request handlers, organized by resource.

pub mod admin;
pub mod projects;
pub mod system_state;
pub mod vote;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;
use vb_types::ProjectId;

use crate::error::ApiError;

/// Parse a path id segment into a project id.
pub(crate) fn parse_id(raw: &str) -> Result<ProjectId, ApiError> {
    raw.parse().map_err(|_| ApiError::invalid_id())
}

/// Unwrap a JSON body extractor, mapping parse failures to
/// `INVALID_JSON`.
pub(crate) fn parse_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|_| ApiError::invalid_json())
}

/// Read an optional strictly-boolean field (`INVALID_TYPE` on any other
/// type, including null).
pub(crate) fn optional_bool(body: &Value, field: &str) -> Result<Option<bool>, ApiError> {
    match body.get(field) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(ApiError::invalid_type(format!("{field} must be a boolean"))),
    }
}

/// Read an optional string field; null and absence both mean `None`.
pub(crate) fn optional_string(body: &Value, field: &str) -> Result<Option<String>, ApiError> {
    match body.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ApiError::invalid_field_type(format!(
            "{field} must be a string"
        ))),
    }
}
