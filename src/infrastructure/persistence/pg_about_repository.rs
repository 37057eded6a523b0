//! PostgreSQL implementation of the about-info singleton.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::DomainError;
use crate::domain::entities::AboutInfo;
use crate::domain::repositories::AboutRepository;

/// The table holds at most one row, pinned to this id by a CHECK constraint.
const ABOUT_ROW_ID: i32 = 1;

pub struct PgAboutRepository {
    pool: Arc<PgPool>,
}

impl PgAboutRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AboutRow {
    description: String,
    last_updated: DateTime<Utc>,
    updated_by_id: Uuid,
    updated_by_username: Option<String>,
}

#[async_trait]
impl AboutRepository for PgAboutRepository {
    async fn get(&self) -> Result<Option<AboutInfo>, DomainError> {
        let row = sqlx::query_as::<_, AboutRow>(
            r#"
            SELECT i.description, i.last_updated, i.updated_by_id,
                   a.username AS updated_by_username
            FROM about_info i
            LEFT JOIN accounts a ON a.id = i.updated_by_id
            WHERE i.id = $1
            "#,
        )
        .bind(ABOUT_ROW_ID)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(|r| AboutInfo {
            description: r.description,
            last_updated: r.last_updated,
            updated_by_id: r.updated_by_id,
            updated_by_username: r.updated_by_username,
        }))
    }

    async fn upsert(
        &self,
        description: &str,
        updated_by_id: Uuid,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO about_info (id, description, last_updated, updated_by_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET description = EXCLUDED.description,
                last_updated = EXCLUDED.last_updated,
                updated_by_id = EXCLUDED.updated_by_id
            "#,
        )
        .bind(ABOUT_ROW_ID)
        .bind(description)
        .bind(updated_at)
        .bind(updated_by_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn insert_if_absent(
        &self,
        description: &str,
        updated_by_id: Uuid,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO about_info (id, description, last_updated, updated_by_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(ABOUT_ROW_ID)
        .bind(description)
        .bind(updated_at)
        .bind(updated_by_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
