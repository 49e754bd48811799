//! Project CRUD and the admin lock toggle.

use std::collections::HashMap;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use vb_core::projects::DEFAULT_PAGE_SIZE;
use vb_core::{NewProject, ProjectQuery, SortKey, SortOrder, UpdateProject};
use vb_store::RecordStore;

use crate::error::ApiError;
use crate::state::AppState;

use super::{optional_string, parse_body, parse_id};

/// `GET /api/projects` - list with search, lock filter, sort, pagination.
pub async fn list_projects<S: RecordStore>(
    State(state): State<AppState<S>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let query = ProjectQuery {
        search: params.get("search").cloned(),
        is_locked: params.get("is_locked").and_then(|v| match v.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }),
        sort: params
            .get("sort")
            .map(|v| SortKey::parse(v))
            .unwrap_or_default(),
        order: params
            .get("order")
            .map(|v| SortOrder::parse(v))
            .unwrap_or_default(),
        limit: params
            .get("limit")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE),
        offset: params
            .get("offset")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0),
    };

    Json(state.projects.list_projects(&query))
}

/// `POST /api/projects`
pub async fn create_project<S: RecordStore>(
    State(state): State<AppState<S>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let body = parse_body(body)?;

    let team_name = match body.get("team_name") {
        None | Some(Value::Null) => {
            return Err(ApiError::missing_field("team_name is required"));
        }
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err(ApiError::invalid_field_type("team_name must be a string"));
        }
    };

    let project = state.projects.create_project(NewProject {
        team_name,
        description: optional_string(&body, "description")?,
        demo_url: optional_string(&body, "demo_url")?,
    })?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// `GET /api/projects/{id}`
pub async fn get_project<S: RecordStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.projects.get_project(id)?))
}

/// `PUT /api/projects/{id}` - partial field update.
pub async fn update_project<S: RecordStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let body = parse_body(body)?;

    let team_name = match body.get("team_name") {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            return Err(ApiError::invalid_field_type("team_name must be a string"));
        }
    };

    // For the optional text fields, an explicit null clears the value.
    let description = parse_clearable(&body, "description")?;
    let demo_url = parse_clearable(&body, "demo_url")?;

    let is_locked = match body.get("is_locked") {
        None => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(_) => {
            return Err(ApiError::invalid_field_type("is_locked must be a boolean"));
        }
    };

    let vote_count = match body.get("vote_count") {
        None => None,
        Some(value) => Some(value.as_u64().ok_or_else(|| {
            ApiError::new(
                StatusCode::BAD_REQUEST,
                vb_core::codes::INVALID_VOTE_COUNT,
                "vote_count must be a non-negative number",
            )
        })?),
    };

    let project = state.projects.update_project(
        id,
        UpdateProject {
            team_name,
            description,
            demo_url,
            is_locked,
            vote_count,
        },
    )?;

    Ok(Json(project))
}

/// `DELETE /api/projects/{id}`
pub async fn delete_project<S: RecordStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let deleted = state.projects.delete_project(id)?;

    Ok(Json(json!({
        "message": "Project deleted successfully",
        "deleted": deleted,
    })))
}

/// `PATCH /api/projects/{id}/lock`
///
/// Strict single-field endpoint: the body must be exactly
/// `{"is_locked": bool}`.
pub async fn toggle_lock<S: RecordStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let body = parse_body(body)?;

    if let Some(object) = body.as_object() {
        if object.keys().any(|key| key != "is_locked") {
            return Err(ApiError::invalid_fields(
                "Only the is_locked field can be updated",
            ));
        }
    }

    let is_locked = match body.get("is_locked") {
        None | Some(Value::Null) => {
            return Err(ApiError::missing_field("is_locked field is required"));
        }
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            return Err(ApiError::invalid_field_type(
                "is_locked must be a boolean value",
            ));
        }
    };

    Ok(Json(state.admin.toggle_project_lock(id, is_locked)?))
}

/// Outer `None` = untouched, `Some(None)` = cleared by an explicit null.
fn parse_clearable(body: &Value, field: &str) -> Result<Option<Option<String>>, ApiError> {
    match body.get(field) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(s)) => Ok(Some(Some(s.clone()))),
        Some(_) => Err(ApiError::invalid_field_type(format!(
            "{field} must be a string"
        ))),
    }
}
