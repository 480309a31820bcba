use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use taskboard_domain::{ExecutorRepository, TaskCoordinator, TaskRepository, UserRepository};
use taskboard_infrastructure::DatabaseManager;

use crate::handlers::{
    auth::login,
    executors::{create_executor, delete_executor, get_executor, list_executors, update_executor_status},
    fallback::route_not_found,
    health::{database_health, health_check},
    tasks::{create_task, delete_task, get_task, list_tasks, update_task_status},
    users::{create_user, delete_user, get_user, list_users, update_user_role},
};

#[derive(Clone)]
pub struct AppState {
    pub user_repo: Arc<dyn UserRepository>,
    pub executor_repo: Arc<dyn ExecutorRepository>,
    pub task_repo: Arc<dyn TaskRepository>,
    pub task_coordinator: Arc<dyn TaskCoordinator>,
    pub database: Arc<DatabaseManager>,
}

impl AppState {
    pub fn from_database(database: Arc<DatabaseManager>) -> Self {
        Self {
            user_repo: database.user_repository(),
            executor_repo: database.executor_repository(),
            task_repo: database.task_repository(),
            task_coordinator: database.task_coordinator(),
            database,
        }
    }
}

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health-db", get(database_health))
        .route("/api/test-db", get(database_health))
        .route("/api/login", post(login))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}", get(get_user).delete(delete_user))
        .route("/api/users/{id}/role", put(update_user_role))
        .route("/api/executors", get(list_executors).post(create_executor))
        .route("/api/executors/{id}", get(get_executor).delete(delete_executor))
        .route("/api/executors/{id}/status", put(update_executor_status))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route("/api/tasks/{id}", get(get_task).delete(delete_task))
        .route("/api/tasks/{id}/status", put(update_task_status))
        .fallback(route_not_found)
        .with_state(state)
}
