pub mod manager;
pub mod postgres;
pub mod sqlite;

pub use manager::{DatabaseManager, DatabasePool, DatabaseType};
pub use postgres::{
    PostgresExecutorRepository, PostgresTaskCoordinator, PostgresTaskRepository,
    PostgresUserRepository,
};
pub use sqlite::{
    SqliteExecutorRepository, SqliteTaskCoordinator, SqliteTaskRepository, SqliteUserRepository,
};
