use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{Executor, ExecutorRepository, ExecutorStatus, NewExecutor};
use tracing::{debug, instrument};

const EXECUTOR_COLUMNS: &str = "id, name, specialization, rating, status, created_at";

pub struct PostgresExecutorRepository {
    pool: PgPool,
}

impl PostgresExecutorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_executor(row: &PgRow) -> TaskboardResult<Executor> {
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
impl ExecutorRepository for PostgresExecutorRepository {
    async fn list(&self) -> TaskboardResult<Vec<Executor>> {
        let rows = sqlx::query(&format!(
            "SELECT {EXECUTOR_COLUMNS} FROM executors ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(Self::row_to_executor).collect()
    }

    async fn get_by_id(&self, id: i64) -> TaskboardResult<Option<Executor>> {
        let row = sqlx::query(&format!(
            "SELECT {EXECUTOR_COLUMNS} FROM executors WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(Self::row_to_executor).transpose()
    }

    #[instrument(skip(self, executor), fields(name = %executor.name))]
    async fn create(&self, executor: &NewExecutor) -> TaskboardResult<Executor> {
        let row = sqlx::query(&format!(
            "INSERT INTO executors (name, specialization, rating, status, created_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {EXECUTOR_COLUMNS}"
        ))
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
        let result = sqlx::query("DELETE FROM executors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(executor_id = id, removed = result.rows_affected(), "Deleted executor");
        Ok(result.rows_affected() > 0)
    }

    async fn update_status(&self, id: i64, status: ExecutorStatus) -> TaskboardResult<()> {
        let result = sqlx::query("UPDATE executors SET status = $1 WHERE id = $2")
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
