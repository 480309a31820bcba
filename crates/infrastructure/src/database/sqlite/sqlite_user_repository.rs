use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{NewUser, User, UserRepository};
use tracing::{debug, instrument};

use crate::credentials::PasswordHasher;

pub struct SqliteUserRepository {
    pool: SqlitePool,
    hasher: PasswordHasher,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool, hasher: PasswordHasher) -> Self {
        Self { pool, hasher }
    }

    fn row_to_user(row: &SqliteRow) -> TaskboardResult<User> {
        Ok(User {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            name: row.try_get("name")?,
            role: row.try_get("role")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn list(&self) -> TaskboardResult<Vec<User>> {
        let rows = sqlx::query("SELECT id, username, name, role, created_at FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(Self::row_to_user).collect()
    }

    async fn get_by_id(&self, id: i64) -> TaskboardResult<Option<User>> {
        let row = sqlx::query("SELECT id, username, name, role, created_at FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::row_to_user).transpose()
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: &NewUser) -> TaskboardResult<User> {
        let password_hash = self.hasher.hash(&user.password).await?;
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, name, role, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, username, name, role, created_at
            "#,
        )
        .bind(&user.username)
        .bind(&password_hash)
        .bind(&user.name)
        .bind(&user.role)
        .bind(chrono::Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match TaskboardError::from(e) {
            TaskboardError::Conflict(_) => {
                TaskboardError::conflict(format!("username '{}' already exists", user.username))
            }
            other => other,
        })?;

        let created = Self::row_to_user(&row)?;
        debug!(user_id = created.id, "Created user");
        Ok(created)
    }

    async fn delete(&self, id: i64) -> TaskboardResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        debug!(user_id = id, removed = result.rows_affected(), "Deleted user");
        Ok(result.rows_affected() > 0)
    }

    async fn update_role(&self, id: i64, role: &str) -> TaskboardResult<()> {
        let result = sqlx::query("UPDATE users SET role = ? WHERE id = ?")
            .bind(role)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(TaskboardError::user_not_found(id));
        }
        debug!(user_id = id, role, "Updated user role");
        Ok(())
    }

    #[instrument(skip(self, password))]
    async fn authenticate(&self, username: &str, password: &str) -> TaskboardResult<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, name, role, created_at, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            self.hasher.waste(password).await?;
            return Ok(None);
        };

        let password_hash: String = row.try_get("password_hash")?;
        if self.hasher.verify(password, &password_hash).await? {
            Ok(Some(Self::row_to_user(&row)?))
        } else {
            Ok(None)
        }
    }
}
