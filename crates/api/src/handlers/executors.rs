use axum::{
    extract::State,
    Json,
};
use serde::Deserialize;
use taskboard_core::TaskboardError;
use taskboard_domain::{Executor, ExecutorStatus, NewExecutor};
use validator::Validate;

use crate::{
    error::ApiResult,
    extract::{ApiPath, ValidatedJson},
    response::{success, success_with, Success},
    routes::AppState,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateExecutorRequest {
    #[serde(deserialize_with = "crate::types::trimmed")]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "crate::types::optional_trimmed")]
    pub specialization: Option<String>,
    #[serde(deserialize_with = "crate::types::rating")]
    pub rating: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateExecutorStatusRequest {
    pub status: ExecutorStatus,
}

pub async fn list_executors(State(state): State<AppState>) -> ApiResult<Json<Vec<Executor>>> {
    Ok(Json(state.executor_repo.list().await?))
}

pub async fn get_executor(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Executor>> {
    let executor = state
        .executor_repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| TaskboardError::executor_not_found(id))?;
    Ok(Json(executor))
}

pub async fn create_executor(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateExecutorRequest>,
) -> ApiResult<Success> {
    let executor = state
        .executor_repo
        .create(&NewExecutor {
            name: request.name,
            specialization: request.specialization,
            rating: request.rating,
        })
        .await?;
    success_with("executor", &executor)
}

/// Succeeds whether or not the executor existed. Tasks keep their snapshot name.
pub async fn delete_executor(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Success> {
    state.executor_repo.delete(id).await?;
    Ok(success())
}

pub async fn update_executor_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<UpdateExecutorStatusRequest>,
) -> ApiResult<Success> {
    state.executor_repo.update_status(id, request.status).await?;
    Ok(success())
}
