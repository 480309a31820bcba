use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use taskboard_core::TaskboardResult;
use taskboard_domain::{Task, TaskRepository};

pub struct SqliteTaskRepository {
    pool: SqlitePool,
}

impl SqliteTaskRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub(crate) fn row_to_task(row: &SqliteRow) -> TaskboardResult<Task> {
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
impl TaskRepository for SqliteTaskRepository {
    async fn list(&self) -> TaskboardResult<Vec<Task>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, deadline, executor_id, executor_name, created_by, status, created_at
            FROM tasks
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(Self::row_to_task).collect()
    }

    async fn get_by_id(&self, id: i64) -> TaskboardResult<Option<Task>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, deadline, executor_id, executor_name, created_by, status, created_at
            FROM tasks
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(Self::row_to_task).transpose()
    }
}
