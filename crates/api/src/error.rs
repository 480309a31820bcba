use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use taskboard_core::TaskboardError;
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] TaskboardError),

    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidPath(rejection.body_text())
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(err) => match err {
                TaskboardError::Validation(_) => StatusCode::BAD_REQUEST,
                TaskboardError::Conflict(_) => StatusCode::CONFLICT,
                TaskboardError::UserNotFound { .. }
                | TaskboardError::ExecutorNotFound { .. }
                | TaskboardError::TaskNotFound { .. } => StatusCode::NOT_FOUND,
                TaskboardError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                TaskboardError::StoreUnavailable(_)
                | TaskboardError::Database(_)
                | TaskboardError::Configuration(_)
                | TaskboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Validation(_) | ApiError::BadRequest(_) | ApiError::InvalidPath(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::Domain(err) => err.user_message(),
            ApiError::Validation(_) => "Invalid request data",
            ApiError::BadRequest(_) => "Invalid request body",
            ApiError::InvalidPath(_) => "Invalid request",
        }
    }

    /// Extra context for the client. Credential failures stay generic.
    fn details(&self) -> Option<String> {
        match self {
            ApiError::Domain(TaskboardError::InvalidCredentials) => None,
            ApiError::Domain(err) => Some(err.to_string()),
            ApiError::Validation(errors) => {
                let mut fields: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .map(|(field, errors)| {
                        let messages: Vec<String> = errors
                            .iter()
                            .map(|e| match &e.message {
                                Some(message) => message.to_string(),
                                None => e.code.to_string(),
                            })
                            .collect();
                        format!("{}: {}", field, messages.join(", "))
                    })
                    .collect();
                fields.sort();
                Some(fields.join("; "))
            }
            ApiError::BadRequest(msg) | ApiError::InvalidPath(msg) => Some(msg.clone()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = match self.details() {
            Some(details) => json!({ "error": self.message(), "details": details }),
            None => json!({ "error": self.message() }),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_domain_error_status_codes() {
        let cases = [
            (TaskboardError::validation("bad"), StatusCode::BAD_REQUEST),
            (TaskboardError::conflict("dup"), StatusCode::CONFLICT),
            (TaskboardError::user_not_found(1), StatusCode::NOT_FOUND),
            (TaskboardError::executor_not_found(1), StatusCode::NOT_FOUND),
            (TaskboardError::task_not_found(1), StatusCode::NOT_FOUND),
            (TaskboardError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                TaskboardError::StoreUnavailable("pool timed out".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (TaskboardError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status_code(), expected);
        }
    }

    #[tokio::test]
    async fn test_invalid_credentials_body_is_generic() {
        let response = ApiError::from(TaskboardError::InvalidCredentials).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Invalid credentials");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_server_error_carries_details() {
        let response =
            ApiError::from(TaskboardError::StoreUnavailable("pool timed out".to_string()))
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Database is unavailable");
        assert!(body["details"].as_str().unwrap().contains("pool timed out"));
    }

    #[derive(Validate)]
    struct NamedForm {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
    }

    #[tokio::test]
    async fn test_validation_errors_list_fields() {
        let errors = NamedForm {
            name: String::new(),
        }
        .validate()
        .unwrap_err();
        let response = ApiError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["details"], "name: name is required");
    }
}
