use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{AvailabilityRules, NewTask, StatusCascade, Task, TaskCoordinator, TaskStatus};
use tracing::{info, instrument};

use super::postgres_task_repository::{PostgresTaskRepository, TASK_COLUMNS};

/// Applies task writes and their executor cascades in one transaction.
///
/// Rows are locked with `FOR UPDATE` so concurrent status changes on the same
/// task serialize instead of interleaving their executor writes.
pub struct PostgresTaskCoordinator {
    pool: PgPool,
}

impl PostgresTaskCoordinator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn apply_cascade(
        tx: &mut Transaction<'_, Postgres>,
        cascade: StatusCascade,
    ) -> TaskboardResult<()> {
        sqlx::query("UPDATE executors SET status = $1 WHERE id = $2")
            .bind(cascade.executor_status)
            .bind(cascade.executor_id)
            .execute(&mut **tx)
            .await?;
        info!(
            executor_id = cascade.executor_id,
            status = %cascade.executor_status,
            "Executor availability updated"
        );
        Ok(())
    }
}

#[async_trait]
impl TaskCoordinator for PostgresTaskCoordinator {
    #[instrument(skip(self, task), fields(title = %task.title, executor_id = ?task.executor_id))]
    async fn create_task(&self, task: &NewTask) -> TaskboardResult<Task> {
        let mut tx = self.pool.begin().await?;

        let executor_name = match (&task.executor_name, task.executor_id) {
            (Some(name), _) => Some(name.clone()),
            (None, Some(executor_id)) => {
                sqlx::query_scalar::<_, String>("SELECT name FROM executors WHERE id = $1")
                    .bind(executor_id)
                    .fetch_optional(&mut *tx)
                    .await?
            }
            (None, None) => None,
        };

        let row = sqlx::query(&format!(
            "INSERT INTO tasks (title, description, deadline, executor_id, executor_name, created_by, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {TASK_COLUMNS}"
        ))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.deadline)
        .bind(task.executor_id)
        .bind(&executor_name)
        .bind(task.created_by)
        .bind(task.initial_status())
        .bind(chrono::Utc::now())
        .fetch_one(&mut *tx)
        .await?;
        let created = PostgresTaskRepository::row_to_task(&row)?;

        if let Some(cascade) = AvailabilityRules::on_create(created.executor_id) {
            Self::apply_cascade(&mut tx, cascade).await?;
        }

        tx.commit().await?;
        info!(task_id = created.id, "Created {}", created.entity_description());
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn update_task_status(&self, id: i64, status: TaskStatus) -> TaskboardResult<()> {
        let mut tx = self.pool.begin().await?;

        let executor_id: Option<Option<i64>> =
            sqlx::query_scalar("SELECT executor_id FROM tasks WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(executor_id) = executor_id else {
            return Err(TaskboardError::task_not_found(id));
        };

        sqlx::query("UPDATE tasks SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if let Some(cascade) = AvailabilityRules::on_status_change(executor_id, status) {
            Self::apply_cascade(&mut tx, cascade).await?;
        }

        tx.commit().await?;
        info!(task_id = id, status = %status, "Task status updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_task(&self, id: i64) -> TaskboardResult<bool> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT executor_id, status FROM tasks WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(false);
        };
        let executor_id: Option<i64> = row.try_get("executor_id")?;
        let status: TaskStatus = row.try_get("status")?;

        if let Some(cascade) = AvailabilityRules::on_delete(executor_id, status) {
            Self::apply_cascade(&mut tx, cascade).await?;
        }

        sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(task_id = id, "Task deleted");
        Ok(true)
    }
}
