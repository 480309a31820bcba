pub mod postgres_executor_repository;
pub mod postgres_task_coordinator;
pub mod postgres_task_repository;
pub mod postgres_user_repository;

pub use postgres_executor_repository::PostgresExecutorRepository;
pub use postgres_task_coordinator::PostgresTaskCoordinator;
pub use postgres_task_repository::PostgresTaskRepository;
pub use postgres_user_repository::PostgresUserRepository;
