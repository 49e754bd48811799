//! The system state gate endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::Value;
use vb_core::PatchState;
use vb_store::RecordStore;

use crate::error::ApiError;
use crate::state::AppState;

use super::{optional_bool, parse_body};

/// `GET /api/system-state`
///
/// Returns the singleton row, creating the `{false, false}` default on a
/// fresh store.
pub async fn get_system_state<S: RecordStore>(
    State(state): State<AppState<S>>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.gate.get_state()?))
}

/// `PATCH /api/system-state`
///
/// Body: `{voting_enabled?, emergency_lockdown?}` - both strictly
/// boolean; only supplied fields change.
pub async fn patch_system_state<S: RecordStore>(
    State(state): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = parse_body(body)?;

    let patch = PatchState {
        voting_enabled: optional_bool(&body, "voting_enabled")?,
        emergency_lockdown: optional_bool(&body, "emergency_lockdown")?,
    };

    Ok(Json(state.gate.patch_state(patch)?))
}
