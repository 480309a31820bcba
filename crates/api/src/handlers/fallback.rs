use axum::{
    http::{StatusCode, Uri},
    Json,
};
use serde_json::Value;
use tracing::debug;

use crate::response::not_found_body;

pub async fn route_not_found(uri: Uri) -> (StatusCode, Json<Value>) {
    debug!(path = %uri.path(), "No route matched");
    (StatusCode::NOT_FOUND, Json(not_found_body(uri.path())))
}
