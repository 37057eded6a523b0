//! Repository trait for the about-info singleton.

use crate::domain::entities::AboutInfo;
use crate::domain::error::DomainError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AboutRepository: Send + Sync {
    /// Loads the singleton record with the updater's username joined.
    async fn get(&self) -> Result<Option<AboutInfo>, DomainError>;

    /// Replaces the record, creating it if absent.
    async fn upsert(
        &self,
        description: &str,
        updated_by_id: Uuid,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Inserts the record only if none exists.
    ///
    /// Returns `Ok(true)` if a record was inserted.
    async fn insert_if_absent(
        &self,
        description: &str,
        updated_by_id: Uuid,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;
}
