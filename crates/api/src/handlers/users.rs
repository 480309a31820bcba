use axum::{
    extract::State,
    Json,
};
use serde::Deserialize;
use taskboard_core::TaskboardError;
use taskboard_domain::{NewUser, User};
use validator::Validate;

use crate::{
    error::ApiResult,
    extract::{ApiPath, ValidatedJson},
    response::{success, success_with, Success},
    routes::AppState,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(deserialize_with = "crate::types::trimmed")]
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[serde(deserialize_with = "crate::types::trimmed")]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(deserialize_with = "crate::types::trimmed")]
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    #[serde(deserialize_with = "crate::types::trimmed")]
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
}

pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.user_repo.list().await?))
}

pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<User>> {
    let user = state
        .user_repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| TaskboardError::user_not_found(id))?;
    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Success> {
    let user = state
        .user_repo
        .create(&NewUser {
            username: request.username,
            password: request.password,
            name: request.name,
            role: request.role,
        })
        .await?;
    success_with("user", &user)
}

/// Succeeds whether or not the user existed.
pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Success> {
    state.user_repo.delete(id).await?;
    Ok(success())
}

pub async fn update_user_role(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<UpdateRoleRequest>,
) -> ApiResult<Success> {
    state.user_repo.update_role(id, &request.role).await?;
    Ok(success())
}
