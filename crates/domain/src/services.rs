//! Executor availability rules.
//!
//! Store coordinators read the task snapshot inside their transaction, ask
//! these functions which executor write (if any) follows, and apply it before
//! committing.

use crate::entities::{ExecutorStatus, TaskStatus};

/// An executor status write implied by a task change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCascade {
    pub executor_id: i64,
    pub executor_status: ExecutorStatus,
}

pub struct AvailabilityRules;

impl AvailabilityRules {
    /// A freshly assigned executor is busy, whatever it was doing before.
    pub fn on_create(executor_id: Option<i64>) -> Option<StatusCascade> {
        executor_id.map(|executor_id| StatusCascade {
            executor_id,
            executor_status: ExecutorStatus::Busy,
        })
    }

    pub fn on_status_change(
        executor_id: Option<i64>,
        new_status: TaskStatus,
    ) -> Option<StatusCascade> {
        executor_id.map(|executor_id| StatusCascade {
            executor_id,
            executor_status: new_status.required_executor_status(),
        })
    }

    pub fn on_delete(executor_id: Option<i64>, current_status: TaskStatus) -> Option<StatusCascade> {
        if !current_status.releases_executor_on_delete() {
            return None;
        }
        executor_id.map(|executor_id| StatusCascade {
            executor_id,
            executor_status: ExecutorStatus::Free,
        })
    }
}
