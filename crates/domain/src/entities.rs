use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use taskboard_core::TaskboardError;

/// A user account. The credential hash never leaves the store layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    /// Plaintext secret as received; hashed before it reaches the database.
    pub password: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutorStatus {
    #[default]
    Free,
    Busy,
}

impl ExecutorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutorStatus::Free => "free",
            ExecutorStatus::Busy => "busy",
        }
    }
}

impl fmt::Display for ExecutorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExecutorStatus {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "free" => Ok(ExecutorStatus::Free),
            "busy" => Ok(ExecutorStatus::Busy),
            other => Err(TaskboardError::validation(format!(
                "invalid executor status '{other}', expected 'free' or 'busy'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Executor {
    pub id: i64,
    pub name: String,
    pub specialization: Option<String>,
    pub rating: f64,
    pub status: ExecutorStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewExecutor {
    pub name: String,
    pub specialization: Option<String>,
    pub rating: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in-progress")]
    InProgress,
    #[serde(rename = "done")]
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }

    /// Only an in-progress task keeps its executor occupied.
    pub fn is_active(&self) -> bool {
        matches!(self, TaskStatus::InProgress)
    }

    /// Executor status implied by a task entering this status.
    pub fn required_executor_status(&self) -> ExecutorStatus {
        if self.is_active() {
            ExecutorStatus::Busy
        } else {
            ExecutorStatus::Free
        }
    }

    /// Whether deleting a task in this status must free its executor.
    pub fn releases_executor_on_delete(&self) -> bool {
        self.is_active()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(TaskboardError::validation(format!(
                "invalid task status '{other}', expected 'pending', 'in-progress' or 'done'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub executor_id: Option<i64>,
    /// Executor name at assignment time; survives executor deletion.
    pub executor_name: Option<String>,
    pub created_by: Option<i64>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn entity_description(&self) -> String {
        format!("task '{}' (id: {}, status: {})", self.title, self.id, self.status)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub executor_id: Option<i64>,
    pub executor_name: Option<String>,
    pub created_by: Option<i64>,
    pub status: Option<TaskStatus>,
}

impl NewTask {
    pub fn initial_status(&self) -> TaskStatus {
        self.status.unwrap_or_default()
    }
}
