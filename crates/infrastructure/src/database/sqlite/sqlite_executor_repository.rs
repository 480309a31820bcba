use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{Executor, ExecutorRepository, ExecutorStatus, NewExecutor};
use tracing::{debug, instrument};

pub struct SqliteExecutorRepository {
    pool: SqlitePool,
}

impl SqliteExecutorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_executor(row: &SqliteRow) -> TaskboardResult<Executor> {
        Ok(Executor {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            specialization: row.try_get("specialization")?,
            rating: row.try_get("rating")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl ExecutorRepository for SqliteExecutorRepository {
    async fn list(&self) -> TaskboardResult<Vec<Executor>> {
        let rows = sqlx::query(
            "SELECT id, name, specialization, rating, status, created_at FROM executors ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(Self::row_to_executor).collect()
    }

    async fn get_by_id(&self, id: i64) -> TaskboardResult<Option<Executor>> {
        let row = sqlx::query(
            "SELECT id, name, specialization, rating, status, created_at FROM executors WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(Self::row_to_executor).transpose()
    }

    #[instrument(skip(self, executor), fields(name = %executor.name))]
    async fn create(&self, executor: &NewExecutor) -> TaskboardResult<Executor> {
        let row = sqlx::query(
            r#"
            INSERT INTO executors (name, specialization, rating, status, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, specialization, rating, status, created_at
            "#,
        )
        .bind(&executor.name)
        .bind(&executor.specialization)
        .bind(executor.rating)
        .bind(ExecutorStatus::Free)
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await?;

        let created = Self::row_to_executor(&row)?;
        debug!(executor_id = created.id, "Created executor");
        Ok(created)
    }

    async fn delete(&self, id: i64) -> TaskboardResult<bool> {
        let result = sqlx::query("DELETE FROM executors WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(executor_id = id, removed = result.rows_affected(), "Deleted executor");
        Ok(result.rows_affected() > 0)
    }

    async fn update_status(&self, id: i64, status: ExecutorStatus) -> TaskboardResult<()> {
        let result = sqlx::query("UPDATE executors SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(TaskboardError::executor_not_found(id));
        }
        debug!(executor_id = id, status = %status, "Updated executor status");
        Ok(())
    }
}
