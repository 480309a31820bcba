use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use taskboard_core::TaskboardResult;
use taskboard_domain::{Task, TaskRepository};

pub(crate) const TASK_COLUMNS: &str =
    "id, title, description, deadline, executor_id, executor_name, created_by, status, created_at";

pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) fn row_to_task(row: &PgRow) -> TaskboardResult<Task> {
        Ok(Task {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            deadline: row.try_get("deadline")?,
            executor_id: row.try_get("executor_id")?,
            executor_name: row.try_get("executor_name")?,
            created_by: row.try_get("created_by")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn list(&self) -> TaskboardResult<Vec<Task>> {
        let rows = sqlx::query(&format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(Self::row_to_task).collect()
    }

    async fn get_by_id(&self, id: i64) -> TaskboardResult<Option<Task>> {
        let row = sqlx::query(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::row_to_task).transpose()
    }
}
