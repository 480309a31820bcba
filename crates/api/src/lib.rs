//! # Taskboard API
//!
//! REST interface over users, executors and tasks, built on axum.
//!
//! Task writes go through the [`TaskCoordinator`](taskboard_domain::TaskCoordinator),
//! which keeps executor availability in step with task status. Every other
//! route is a plain read or single-record write.
//!
//! ## Endpoints
//!
//! - `GET /health`, `GET /health-db`, `GET /api/test-db`
//! - `POST /api/login`
//! - `GET|POST /api/users`, `GET|DELETE /api/users/{id}`, `PUT /api/users/{id}/role`
//! - `GET|POST /api/executors`, `GET|DELETE /api/executors/{id}`,
//!   `PUT /api/executors/{id}/status`
//! - `GET|POST /api/tasks`, `GET|DELETE /api/tasks/{id}`, `PUT /api/tasks/{id}/status`
//!
//! Errors are returned as `{"error": "...", "details": "..."}`.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod types;

use std::time::Duration;

use axum::{extract::DefaultBodyLimit, Router};
use taskboard_core::ApiConfig;
use tower::ServiceBuilder;

use middleware::{cors_layer, enforce_timeout, request_logging, trace_layer};
pub use routes::{create_routes, AppState};

/// Builds the full application: routes plus tracing, CORS, logging, body
/// limit and request timeout layers.
pub fn create_app(state: AppState, api_config: &ApiConfig) -> Router {
    let timeout = Duration::from_secs(api_config.request_timeout_seconds);
    let body_limit = api_config.max_request_size_mb * 1024 * 1024;

    create_routes(state).layer(
        ServiceBuilder::new()
            .layer(trace_layer())
            .layer(cors_layer(api_config))
            .layer(axum::middleware::from_fn(request_logging))
            .layer(axum::middleware::from_fn_with_state(timeout, enforce_timeout))
            .layer(DefaultBodyLimit::max(body_limit)),
    )
}
