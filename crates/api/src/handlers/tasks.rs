use axum::{
    extract::State,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use taskboard_core::TaskboardError;
use taskboard_domain::{NewTask, Task, TaskStatus};
use validator::Validate;

use crate::{
    error::ApiResult,
    extract::{ApiPath, ValidatedJson},
    response::{success, success_with, Success},
    routes::AppState,
};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[serde(deserialize_with = "crate::types::trimmed")]
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[serde(default, deserialize_with = "crate::types::optional_trimmed")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::types::optional_deadline")]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub executor_id: Option<i64>,
    #[serde(default, deserialize_with = "crate::types::optional_trimmed")]
    pub executor_name: Option<String>,
    #[serde(default)]
    pub created_by: Option<i64>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskStatusRequest {
    pub status: TaskStatus,
}

pub async fn list_tasks(State(state): State<AppState>) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.task_repo.list().await?))
}

pub async fn get_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Task>> {
    let task = state
        .task_repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| TaskboardError::task_not_found(id))?;
    Ok(Json(task))
}

/// Creates the task and marks its executor busy in the same transaction.
pub async fn create_task(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateTaskRequest>,
) -> ApiResult<Success> {
    let task = state
        .task_coordinator
        .create_task(&NewTask {
            title: request.title,
            description: request.description,
            deadline: request.deadline,
            executor_id: request.executor_id,
            executor_name: request.executor_name,
            created_by: request.created_by,
            status: request.status,
        })
        .await?;
    success_with("task", &task)
}

/// Frees the executor when the task was in progress. A missing id is a no-op.
pub async fn delete_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Success> {
    state.task_coordinator.delete_task(id).await?;
    Ok(success())
}

pub async fn update_task_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<UpdateTaskStatusRequest>,
) -> ApiResult<Success> {
    state.task_coordinator.update_task_status(id, request.status).await?;
    Ok(success())
}
