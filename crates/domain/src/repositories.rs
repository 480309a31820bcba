//! Store abstractions
//!
//! Plain CRUD repositories plus the [`TaskCoordinator`], which owns every write
//! that touches a task together with its assigned executor.

use async_trait::async_trait;
use taskboard_core::TaskboardResult;

use crate::entities::{
    Executor, ExecutorStatus, NewExecutor, NewTask, NewUser, Task, TaskStatus, User,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Users in insertion order.
    async fn list(&self) -> TaskboardResult<Vec<User>>;
    async fn get_by_id(&self, id: i64) -> TaskboardResult<Option<User>>;
    /// Fails with `Conflict` when the username is taken.
    async fn create(&self, user: &NewUser) -> TaskboardResult<User>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> TaskboardResult<bool>;
    /// Fails with `UserNotFound` when the id does not exist.
    async fn update_role(&self, id: i64, role: &str) -> TaskboardResult<()>;
    /// Returns the user when `username` exists and `password` matches its hash.
    async fn authenticate(&self, username: &str, password: &str) -> TaskboardResult<Option<User>>;
}

#[async_trait]
pub trait ExecutorRepository: Send + Sync {
    async fn list(&self) -> TaskboardResult<Vec<Executor>>;
    async fn get_by_id(&self, id: i64) -> TaskboardResult<Option<Executor>>;
    async fn create(&self, executor: &NewExecutor) -> TaskboardResult<Executor>;
    async fn delete(&self, id: i64) -> TaskboardResult<bool>;
    /// Fails with `ExecutorNotFound` when the id does not exist.
    async fn update_status(&self, id: i64, status: ExecutorStatus) -> TaskboardResult<()>;
}

/// Read side of tasks; writes go through [`TaskCoordinator`].
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn list(&self) -> TaskboardResult<Vec<Task>>;
    async fn get_by_id(&self, id: i64) -> TaskboardResult<Option<Task>>;
}

/// Task writes that cascade into executor availability.
///
/// Each method runs as a single transaction: the task row and the executor row
/// are committed together or not at all.
#[async_trait]
pub trait TaskCoordinator: Send + Sync {
    /// Inserts the task and marks its executor busy.
    async fn create_task(&self, task: &NewTask) -> TaskboardResult<Task>;
    /// Fails with `TaskNotFound` without touching any executor when the id is unknown.
    async fn update_task_status(&self, id: i64, status: TaskStatus) -> TaskboardResult<()>;
    /// Returns whether a task was removed; a missing id is not an error.
    async fn delete_task(&self, id: i64) -> TaskboardResult<bool>;
}
