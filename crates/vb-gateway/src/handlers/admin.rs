//! Admin stats and activity log endpoints.

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;
use vb_core::activity::DEFAULT_PAGE_SIZE;
use vb_store::RecordStore;

use crate::error::ApiError;
use crate::state::AppState;

use super::{optional_string, parse_body};

/// `GET /api/admin/stats`
pub async fn get_stats<S: RecordStore>(State(state): State<AppState<S>>) -> impl IntoResponse {
    Json(state.stats.compute_stats())
}

/// `GET /api/admin/activity` - newest first, paginated.
pub async fn list_activity<S: RecordStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let limit = params
        .get("limit")
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let offset = params
        .get("offset")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    Json(state.activity.recent_activity(limit, offset))
}

/// `POST /api/admin/activity`
pub async fn append_activity<S: RecordStore>(
    State(state): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = parse_body(body)?;

    let action = match body.get("action") {
        None | Some(Value::Null) => {
            return Err(ApiError::missing_field("Action is required"));
        }
        Some(Value::String(s)) => s.clone(),
        Some(_) => return Err(ApiError::invalid_field_type("action must be a string")),
    };
    let details = optional_string(&body, "details")?;

    let entry = state.activity.log_activity(&action, details)?;
    Ok((StatusCode::CREATED, Json(entry)))
}
