pub mod sqlite_executor_repository;
pub mod sqlite_task_coordinator;
pub mod sqlite_task_repository;
pub mod sqlite_user_repository;

pub use sqlite_executor_repository::SqliteExecutorRepository;
pub use sqlite_task_coordinator::SqliteTaskCoordinator;
pub use sqlite_task_repository::SqliteTaskRepository;
pub use sqlite_user_repository::SqliteUserRepository;
