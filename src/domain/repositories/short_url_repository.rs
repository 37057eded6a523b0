//! Repository trait for short URL data access.

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::error::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for the short URL store.
///
/// The store is the single owner of persisted entries. Implementations must
/// enforce uniqueness of `short_code` (and `original_url`) atomically on insert,
/// independently of any pre-checks made by callers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryStore`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Point lookup by entry id.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Unexpected`] on database errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShortUrl>, DomainError>;

    /// Point lookup by short code through the unique index.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Unexpected`] on database errors.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortUrl>, DomainError>;

    /// Checks whether a short code is taken, without loading the row.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Unexpected`] on database errors.
    async fn exists_by_code(&self, short_code: &str) -> Result<bool, DomainError>;

    /// Checks whether an original URL has already been shortened.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Unexpected`] on database errors.
    async fn exists_by_original_url(&self, original_url: &str) -> Result<bool, DomainError>;

    /// Inserts a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::CodeConflict`] if the short code is already taken.
    /// Returns [`DomainError::DuplicateUrl`] if the original URL is already stored.
    /// Returns [`DomainError::Unexpected`] on other database errors.
    async fn create(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, DomainError>;

    /// Permanently removes an entry.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Unexpected`] on database errors.
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Lists all entries, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Unexpected`] on database errors.
    async fn list(&self) -> Result<Vec<ShortUrl>, DomainError>;

    /// Counts entries owned by an account.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Unexpected`] on database errors.
    async fn count_by_owner(&self, owner_id: Uuid) -> Result<i64, DomainError>;

    /// Counts all entries.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Unexpected`] on database errors.
    async fn count(&self) -> Result<i64, DomainError>;
}
