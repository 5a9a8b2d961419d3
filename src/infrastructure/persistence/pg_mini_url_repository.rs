//! PostgreSQL implementation of the mini URL repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{InsertOutcome, MiniUrl, NewMiniUrl};
use crate::domain::repositories::MiniUrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for the `mini_urls` table.
///
/// Key reservation relies on the primary key: inserts use
/// `ON CONFLICT (mini_key) DO NOTHING`, so a taken key is reported as
/// [`InsertOutcome::KeyTaken`] instead of a unique violation.
pub struct PgMiniUrlRepository {
    pool: Arc<PgPool>,
}

impl PgMiniUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MiniUrlRepository for PgMiniUrlRepository {
    async fn exists(&self, mini_key: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM mini_urls WHERE mini_key = $1)")
                .bind(mini_key)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn find_by_key(&self, mini_key: &str) -> Result<Option<MiniUrl>, AppError> {
        let row = sqlx::query_as::<_, MiniUrl>(
            r#"
            SELECT mini_key, full_url, created_at, updated_at
            FROM mini_urls
            WHERE mini_key = $1
            "#,
        )
        .bind(mini_key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn find_by_full_url(&self, full_url: &str) -> Result<Option<MiniUrl>, AppError> {
        let row = sqlx::query_as::<_, MiniUrl>(
            r#"
            SELECT mini_key, full_url, created_at, updated_at
            FROM mini_urls
            WHERE full_url = $1
            ORDER BY created_at, mini_key
            LIMIT 1
            "#,
        )
        .bind(full_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn insert_if_absent(&self, new_mini_url: NewMiniUrl) -> Result<InsertOutcome, AppError> {
        let row = sqlx::query_as::<_, MiniUrl>(
            r#"
            INSERT INTO mini_urls (mini_key, full_url, created_at, updated_at)
            VALUES ($1, $2, now(), now())
            ON CONFLICT (mini_key) DO NOTHING
            RETURNING mini_key, full_url, created_at, updated_at
            "#,
        )
        .bind(&new_mini_url.mini_key)
        .bind(&new_mini_url.full_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(match row {
            Some(record) => InsertOutcome::Inserted(record),
            None => InsertOutcome::KeyTaken,
        })
    }

    async fn update_full_url(
        &self,
        mini_key: &str,
        full_url: &str,
    ) -> Result<Option<MiniUrl>, AppError> {
        let row = sqlx::query_as::<_, MiniUrl>(
            r#"
            UPDATE mini_urls
            SET full_url = $2,
                updated_at = GREATEST(now(), updated_at)
            WHERE mini_key = $1
            RETURNING mini_key, full_url, created_at, updated_at
            "#,
        )
        .bind(mini_key)
        .bind(full_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row)
    }

    async fn delete(&self, mini_key: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM mini_urls WHERE mini_key = $1")
            .bind(mini_key)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_all(&self) -> Result<Vec<MiniUrl>, AppError> {
        let rows = sqlx::query_as::<_, MiniUrl>(
            r#"
            SELECT mini_key, full_url, created_at, updated_at
            FROM mini_urls
            ORDER BY created_at, mini_key
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
