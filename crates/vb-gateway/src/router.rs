//! Route table and middleware wiring.

use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use vb_store::RecordStore;

use crate::config::GatewayConfig;
use crate::handlers::{admin, projects, system_state, vote};
use crate::middleware::create_cors_layer;
use crate::state::AppState;

/// Build the gateway router with the full route table and middleware
/// stack.
pub fn build_router<S: RecordStore>(state: AppState<S>, config: &GatewayConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/api/projects/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/api/projects/:id/lock", patch(projects::toggle_lock))
        .route("/api/projects/:id/vote", post(vote::cast_vote))
        .route(
            "/api/system-state",
            get(system_state::get_system_state).patch(system_state::patch_system_state),
        )
        .route("/api/admin/stats", get(admin::get_stats))
        .route(
            "/api/admin/activity",
            get(admin::list_activity).post(admin::append_activity),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(&config.cors)),
        )
        .with_state(state)
}

/// Liveness probe.
async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
