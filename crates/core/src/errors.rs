use sqlx::error::ErrorKind;
use thiserror::Error;

/// Unified error type shared by every taskboard crate.
#[derive(Debug, Error)]
pub enum TaskboardError {
    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("user not found: {id}")]
    UserNotFound { id: i64 },

    #[error("executor not found: {id}")]
    ExecutorNotFound { id: i64 },

    #[error("task not found: {id}")]
    TaskNotFound { id: i64 },

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type TaskboardResult<T> = Result<T, TaskboardError>;

impl TaskboardError {
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }
    pub fn conflict<S: Into<String>>(msg: S) -> Self {
        Self::Conflict(msg.into())
    }
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
    pub fn config_error<S: Into<String>>(msg: S) -> Self {
        Self::Configuration(msg.into())
    }
    pub fn user_not_found(id: i64) -> Self {
        Self::UserNotFound { id }
    }
    pub fn executor_not_found(id: i64) -> Self {
        Self::ExecutorNotFound { id }
    }
    pub fn task_not_found(id: i64) -> Self {
        Self::TaskNotFound { id }
    }
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound { .. } | Self::ExecutorNotFound { .. } | Self::TaskNotFound { .. }
        )
    }
    /// Connection-level failures: the store could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_))
    }
    pub fn user_message(&self) -> &str {
        match self {
            Self::UserNotFound { .. } => "User not found",
            Self::ExecutorNotFound { .. } => "Executor not found",
            Self::TaskNotFound { .. } => "Task not found",
            Self::InvalidCredentials => "Invalid credentials",
            Self::Validation(_) => "Invalid request data",
            Self::Conflict(_) => "Resource already exists",
            Self::StoreUnavailable(_) => "Database is unavailable",
            _ => "Server error",
        }
    }
}

impl From<sqlx::Error> for TaskboardError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let detail = match db_err.constraint() {
                Some(constraint) => format!("{} ({constraint})", db_err.message()),
                None => db_err.message().to_string(),
            };
            match db_err.kind() {
                ErrorKind::UniqueViolation => return Self::Conflict(detail),
                ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => return Self::Validation(detail),
                _ => {}
            }
        }

        if let sqlx::Error::Configuration(cause) = &err {
            return Self::config_error(format!("invalid database configuration: {cause}"));
        }

        if matches!(
            err,
            sqlx::Error::PoolTimedOut
                | sqlx::Error::PoolClosed
                | sqlx::Error::WorkerCrashed
                | sqlx::Error::Io(_)
                | sqlx::Error::Tls(_)
        ) {
            return Self::StoreUnavailable(err.to_string());
        }

        Self::Database(err)
    }
}

impl From<serde_json::Error> for TaskboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("serialization failed: {err}"))
    }
}
