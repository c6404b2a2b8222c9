use anyhow::Context;
use sqlx::SqlitePool;
use time::OffsetDateTime;

pub use super::repo_types::{LinkedAccount, DEFAULT_PROVIDER};

impl LinkedAccount {
    /// Insert a new link. An empty display name is stored as NULL.
    pub async fn create(
        db: &SqlitePool,
        user_id: i64,
        provider: &str,
        account_id: &str,
        account_name: &str,
    ) -> anyhow::Result<LinkedAccount> {
        let now = OffsetDateTime::now_utc();
        let name = Some(account_name).filter(|n| !n.is_empty());
        let row = sqlx::query_as::<_, LinkedAccount>(
            r#"
            INSERT INTO linked_accounts (user_id, provider, account_id, account_name, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, provider, account_id, account_name, created_at, updated_at, deleted_at
            "#,
        )
        .bind(user_id)
        .bind(provider)
        .bind(account_id)
        .bind(name)
        .bind(now)
        .bind(now)
        .fetch_one(db)
        .await
        .context("insert linked account")?;
        Ok(row)
    }

    /// Live links of a user, newest first.
    pub async fn list_by_user(db: &SqlitePool, user_id: i64) -> anyhow::Result<Vec<LinkedAccount>> {
        let rows = sqlx::query_as::<_, LinkedAccount>(
            r#"
            SELECT id, user_id, provider, account_id, account_name, created_at, updated_at, deleted_at
              FROM linked_accounts
             WHERE user_id = ? AND deleted_at IS NULL
             ORDER BY id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
        .context("list linked accounts by user")?;
        Ok(rows)
    }

    pub async fn find_owned(
        db: &SqlitePool,
        user_id: i64,
        id: i64,
    ) -> anyhow::Result<Option<LinkedAccount>> {
        let row = sqlx::query_as::<_, LinkedAccount>(
            r#"
            SELECT id, user_id, provider, account_id, account_name, created_at, updated_at, deleted_at
              FROM linked_accounts
             WHERE id = ? AND user_id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await
        .context("find linked account")?;
        Ok(row)
    }

    /// Soft-delete a link owned by `user_id`. Returns false when no such live row exists.
    pub async fn soft_delete(db: &SqlitePool, user_id: i64, id: i64) -> anyhow::Result<bool> {
        let now = OffsetDateTime::now_utc();
        let res = sqlx::query(
            r#"
            UPDATE linked_accounts
               SET deleted_at = ?, updated_at = ?
             WHERE id = ? AND user_id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(now)
        .bind(now)
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await
        .context("soft delete linked account")?;
        Ok(res.rows_affected() > 0)
    }
}
