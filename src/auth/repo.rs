use anyhow::Context;
use sqlx::SqlitePool;
use time::OffsetDateTime;

pub use super::repo_types::User;

impl User {
    /// Find a live (not soft-deleted) user by email.
    pub async fn find_by_email(db: &SqlitePool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at, deleted_at
            FROM users
            WHERE email = ? AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    /// Create a new user with hashed password.
    ///
    /// A duplicate email surfaces as a unique violation (see `db::is_unique_violation`).
    pub async fn create(db: &SqlitePool, email: &str, password_hash: &str) -> anyhow::Result<User> {
        let now = OffsetDateTime::now_utc();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, email, password_hash, created_at, updated_at, deleted_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(db)
        .await
        .context("insert user")?;
        Ok(user)
    }
}
