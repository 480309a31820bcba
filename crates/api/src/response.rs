use axum::{response::IntoResponse, Json};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::ApiError;

/// `{"success": true}` optionally carrying one named payload, e.g.
/// `{"success": true, "task": {...}}`.
#[derive(Debug, Clone)]
pub struct Success {
    payload: Option<(&'static str, Value)>,
}

impl Success {
    pub fn empty() -> Self {
        Self { payload: None }
    }

    pub fn with<T: Serialize>(key: &'static str, value: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(value).map_err(taskboard_core::TaskboardError::from)?;
        Ok(Self {
            payload: Some((key, value)),
        })
    }

    pub fn into_value(self) -> Value {
        let mut body = Map::new();
        body.insert("success".to_string(), Value::Bool(true));
        if let Some((key, value)) = self.payload {
            body.insert(key.to_string(), value);
        }
        Value::Object(body)
    }
}

impl IntoResponse for Success {
    fn into_response(self) -> axum::response::Response {
        Json(self.into_value()).into_response()
    }
}

pub fn success() -> Success {
    Success::empty()
}

pub fn success_with<T: Serialize>(key: &'static str, value: &T) -> Result<Success, ApiError> {
    Success::with(key, value)
}

/// Body for routes that matched nothing.
pub fn not_found_body(path: &str) -> Value {
    json!({ "error": "Route not found", "path": path })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Item {
        id: i64,
        name: &'static str,
    }

    #[test]
    fn test_empty_success() {
        assert_eq!(success().into_value(), json!({ "success": true }));
    }

    #[test]
    fn test_success_with_payload() {
        let body = success_with("executor", &Item { id: 3, name: "Alice" })
            .unwrap()
            .into_value();
        assert_eq!(
            body,
            json!({ "success": true, "executor": { "id": 3, "name": "Alice" } })
        );
    }

    #[test]
    fn test_not_found_body() {
        assert_eq!(
            not_found_body("/api/nothing"),
            json!({ "error": "Route not found", "path": "/api/nothing" })
        );
    }
}
