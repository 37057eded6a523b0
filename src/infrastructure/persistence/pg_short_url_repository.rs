//! PostgreSQL implementation of the short URL store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::DomainError;
use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::ShortUrlRepository;

/// PostgreSQL repository for short URL entries.
///
/// Uniqueness of `short_code` and `original_url` is enforced by the table's
/// unique constraints; violations surface as [`DomainError::CodeConflict`] and
/// [`DomainError::DuplicateUrl`].
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ShortUrlRow {
    id: Uuid,
    original_url: String,
    short_code: String,
    created_by_user_id: Uuid,
    created_by_username: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(r: ShortUrlRow) -> Self {
        ShortUrl {
            id: r.id,
            original_url: r.original_url,
            short_code: r.short_code,
            created_by_user_id: r.created_by_user_id,
            created_by_username: r.created_by_username,
            created_at: r.created_at,
        }
    }
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShortUrl>, DomainError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT s.id, s.original_url, s.short_code, s.created_by_user_id,
                   a.username AS created_by_username, s.created_at
            FROM short_urls s
            LEFT JOIN accounts a ON a.id = s.created_by_user_id
            WHERE s.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortUrl::from))
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortUrl>, DomainError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT s.id, s.original_url, s.short_code, s.created_by_user_id,
                   a.username AS created_by_username, s.created_at
            FROM short_urls s
            LEFT JOIN accounts a ON a.id = s.created_by_user_id
            WHERE s.short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortUrl::from))
    }

    async fn exists_by_code(&self, short_code: &str) -> Result<bool, DomainError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM short_urls WHERE short_code = $1)",
        )
        .bind(short_code)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn exists_by_original_url(&self, original_url: &str) -> Result<bool, DomainError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM short_urls WHERE original_url = $1)",
        )
        .bind(original_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn create(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, DomainError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            WITH inserted AS (
                INSERT INTO short_urls (id, original_url, short_code, created_by_user_id, created_at)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, original_url, short_code, created_by_user_id, created_at
            )
            SELECT i.id, i.original_url, i.short_code, i.created_by_user_id,
                   a.username AS created_by_username, i.created_at
            FROM inserted i
            LEFT JOIN accounts a ON a.id = i.created_by_user_id
            "#,
        )
        .bind(new_short_url.id)
        .bind(&new_short_url.original_url)
        .bind(&new_short_url.short_code)
        .bind(new_short_url.created_by_user_id)
        .bind(new_short_url.created_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM short_urls WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<ShortUrl>, DomainError> {
        let rows = sqlx::query_as::<_, ShortUrlRow>(
            r#"
            SELECT s.id, s.original_url, s.short_code, s.created_by_user_id,
                   a.username AS created_by_username, s.created_at
            FROM short_urls s
            LEFT JOIN accounts a ON a.id = s.created_by_user_id
            ORDER BY s.created_at DESC, s.id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ShortUrl::from).collect())
    }

    async fn count_by_owner(&self, owner_id: Uuid) -> Result<i64, DomainError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM short_urls WHERE created_by_user_id = $1",
        )
        .bind(owner_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM short_urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
