use axum::extract::State;
use serde::Deserialize;
use taskboard_core::TaskboardError;
use tracing::{info, warn};
use validator::Validate;

use crate::{
    error::ApiResult,
    extract::ValidatedJson,
    response::{success_with, Success},
    routes::AppState,
};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(deserialize_with = "crate::types::trimmed")]
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Checks credentials and returns the user without its password hash.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Success> {
    let user = state
        .user_repo
        .authenticate(&request.username, &request.password)
        .await?;

    match user {
        Some(user) => {
            info!(user_id = user.id, username = %user.username, "User logged in");
            success_with("user", &user)
        }
        None => {
            warn!(username = %request.username, "Login rejected");
            Err(TaskboardError::InvalidCredentials.into())
        }
    }
}
