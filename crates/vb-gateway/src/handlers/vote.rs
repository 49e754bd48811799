//! The voting endpoint.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use vb_core::CoreError;
use vb_store::RecordStore;

use crate::error::ApiError;
use crate::state::AppState;

use super::{parse_body, parse_id};

/// `POST /api/projects/{id}/vote`
///
/// Body: `{"voter_identifier": "..."}`. On success returns 201 with the
/// committed vote and the updated project tally.
pub async fn cast_vote<S: RecordStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let project_id = parse_id(&id)?;
    let body = parse_body(body)?;

    let voter_identifier = match body.get("voter_identifier") {
        Some(Value::String(s)) => s.clone(),
        _ => return Err(CoreError::MissingVoterIdentifier.into()),
    };

    let receipt = state.voting.cast_vote(project_id, &voter_identifier)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Vote cast successfully",
            "vote": receipt.vote,
            "project": {
                "id": receipt.project.id,
                "teamName": receipt.project.team_name,
                "voteCount": receipt.project.vote_count,
            },
        })),
    ))
}
