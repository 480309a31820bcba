use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use tracing::error;

use crate::routes::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Server is running",
        "service": "taskboard",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Round-trips to the database and reports its clock.
pub async fn database_health(State(state): State<AppState>) -> impl IntoResponse {
    match state.database.current_time().await {
        Ok(time) => (
            StatusCode::OK,
            Json(json!({
                "status": "OK",
                "success": true,
                "time": time.to_rfc3339(),
                "database": state.database.database_type().as_str(),
            })),
        ),
        Err(e) => {
            error!(error = %e, "Database health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "ERROR",
                    "success": false,
                    "error": e.to_string(),
                })),
            )
        }
    }
}
