//! Short URL lifecycle: create, resolve, get, list, delete.

use chrono::{DateTime, Utc};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::services::code_allocator::CodeAllocator;
use crate::application::traced::traced;
use crate::domain::DomainError;
use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::ShortUrlRepository;

/// Extra allocate-and-insert rounds after the store reports a code conflict.
pub const INSERT_CONFLICT_RETRIES: u32 = 2;

/// Public projection of an entry, without any owner identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicShortUrl {
    pub original_url: String,
    pub short_code: String,
    pub created_by_username: String,
    pub created_at: DateTime<Utc>,
}

impl From<ShortUrl> for PublicShortUrl {
    fn from(entry: ShortUrl) -> Self {
        let created_by_username = entry.creator_display_name().to_string();
        Self {
            original_url: entry.original_url,
            short_code: entry.short_code,
            created_by_username,
            created_at: entry.created_at,
        }
    }
}

/// One row of [`ShortUrlService::list`], projected by caller visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortUrlListing {
    Full(ShortUrl),
    Public(PublicShortUrl),
}

/// Orchestrates the allocator and the store.
///
/// Holds no state between calls; every operation re-reads from the store.
pub struct ShortUrlService {
    repository: Arc<dyn ShortUrlRepository>,
    allocator: CodeAllocator,
}

impl ShortUrlService {
    /// Creates the service with an allocator producing `code_length` codes.
    pub fn new(repository: Arc<dyn ShortUrlRepository>, code_length: i32) -> Self {
        let allocator = CodeAllocator::new(Arc::clone(&repository), code_length);
        Self {
            repository,
            allocator,
        }
    }

    /// Shortens `original_url` on behalf of `owner_id` and returns the new id.
    ///
    /// The URL must already be validated as absolute by the caller.
    ///
    /// # Concurrency
    ///
    /// Allocation and insert are not atomic. If a concurrent writer takes the
    /// same code first, the store rejects the insert with
    /// [`DomainError::CodeConflict`] and a fresh code is allocated, up to
    /// [`INSERT_CONFLICT_RETRIES`] more times.
    ///
    /// # Errors
    ///
    /// - [`DomainError::DuplicateUrl`] if the URL is already shortened by anyone
    /// - [`DomainError::CodeGenerationFailed`] if the allocator is exhausted or
    ///   insert conflicts persist
    /// - [`DomainError::Unexpected`] on store failures
    pub async fn create(&self, original_url: &str, owner_id: Uuid) -> Result<Uuid, DomainError> {
        traced(
            "create_short_url",
            json!({ "original_url": original_url, "owner_id": owner_id }),
            self.insert_with_fresh_code(original_url, owner_id),
        )
        .await
    }

    async fn insert_with_fresh_code(
        &self,
        original_url: &str,
        owner_id: Uuid,
    ) -> Result<Uuid, DomainError> {
        if self.repository.exists_by_original_url(original_url).await? {
            return Err(DomainError::DuplicateUrl);
        }

        for round in 0..=INSERT_CONFLICT_RETRIES {
            let short_code = self.allocator.allocate_default().await?;
            let new_entry = NewShortUrl::new(original_url.to_string(), short_code, owner_id);

            match self.repository.create(new_entry).await {
                Ok(entry) => return Ok(entry.id),
                Err(DomainError::CodeConflict) => {
                    metrics::counter!("short_url_insert_conflicts_total").increment(1);
                    tracing::warn!(round, "Short code taken by a concurrent insert");
                }
                Err(e) => return Err(e),
            }
        }

        Err(DomainError::CodeGenerationFailed)
    }

    /// Resolves a short code to its original URL.
    ///
    /// Backs the public redirect; callers need not be authenticated.
    ///
    /// # Errors
    ///
    /// - [`DomainError::EmptyCode`] if the code is blank (the store is not queried)
    /// - [`DomainError::NotFound`] if no servable entry has this code
    pub async fn resolve(&self, short_code: &str) -> Result<String, DomainError> {
        traced(
            "resolve_short_code",
            json!({ "short_code": short_code }),
            async {
                if short_code.trim().is_empty() {
                    return Err(DomainError::EmptyCode);
                }

                self.repository
                    .find_by_code(short_code)
                    .await?
                    .filter(|entry| !entry.is_blank())
                    .map(|entry| entry.original_url)
                    .ok_or(DomainError::NotFound)
            },
        )
        .await
    }

    /// Loads a full entry, owner id included.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotFound`] if the entry is absent or blank.
    pub async fn get(&self, id: Uuid) -> Result<ShortUrl, DomainError> {
        traced("get_short_url", json!({ "id": id }), self.find_servable(id)).await
    }

    /// Lists every entry, most recent first.
    ///
    /// Anonymous callers get [`ShortUrlListing::Public`] rows only.
    pub async fn list(&self, is_authenticated: bool) -> Result<Vec<ShortUrlListing>, DomainError> {
        traced(
            "list_short_urls",
            json!({ "is_authenticated": is_authenticated }),
            async {
                let entries = self.repository.list().await?;

                Ok(entries
                    .into_iter()
                    .map(|entry| {
                        if is_authenticated {
                            ShortUrlListing::Full(entry)
                        } else {
                            ShortUrlListing::Public(entry.into())
                        }
                    })
                    .collect())
            },
        )
        .await
    }

    /// Permanently deletes an entry.
    ///
    /// # Errors
    ///
    /// - [`DomainError::NotFound`] if the entry is absent
    /// - [`DomainError::ForbiddenDeletion`] if the requester is neither owner nor admin
    pub async fn delete(
        &self,
        id: Uuid,
        requested_by: Uuid,
        is_admin: bool,
    ) -> Result<(), DomainError> {
        traced(
            "delete_short_url",
            json!({ "id": id, "requested_by": requested_by, "is_admin": is_admin }),
            async {
                let entry = self.find_servable(id).await?;

                if !is_admin && entry.created_by_user_id != requested_by {
                    return Err(DomainError::ForbiddenDeletion);
                }

                if !self.repository.delete(id).await? {
                    return Err(DomainError::NotFound);
                }

                Ok(())
            },
        )
        .await
    }

    /// Total number of stored entries.
    pub async fn count(&self) -> Result<i64, DomainError> {
        traced("count_short_urls", json!({}), self.repository.count()).await
    }

    async fn find_servable(&self, id: Uuid) -> Result<ShortUrl, DomainError> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(|entry| !entry.is_blank())
            .ok_or(DomainError::NotFound)
    }
}
