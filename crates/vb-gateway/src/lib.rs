//! # vb-gateway
//!
//! HTTP gateway for Voteboard: the REST surface over the domain services.
//!
//! ## Surface
//!
//! - `POST /api/projects/{id}/vote` - the voting transaction
//! - `GET|POST /api/projects`, `GET|PUT|DELETE /api/projects/{id}` - CRUD
//! - `PATCH /api/projects/{id}/lock` - admin lock toggle
//! - `GET|PATCH /api/system-state` - the voting gate
//! - `GET /api/admin/stats`, `GET|POST /api/admin/activity`
//! - `GET /health`
//!
//! Every error response is `{error, code}` with a stable machine-readable
//! code; the HTTP status mapping lives in [`error`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;
pub mod state;

pub use config::{CorsConfig, GatewayConfig};
pub use error::{ApiError, GatewayError};
pub use router::build_router;
pub use service::GatewayService;
pub use state::AppState;
