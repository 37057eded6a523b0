//! Collision-checked short code allocation.

use serde_json::json;
use std::sync::Arc;

use crate::application::traced::traced;
use crate::domain::DomainError;
use crate::domain::repositories::ShortUrlRepository;
use crate::utils::code_generator::generate_code;

/// Maximum number of candidates tried before allocation gives up.
pub const MAX_ATTEMPTS: u32 = 10;

/// Reasons an allocation can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("Short code length must be greater than 0, but was {0}.")]
    InvalidLength(i32),

    /// Every candidate collided with an existing code. Not retriable at the
    /// same length: it signals a saturated or adversarial state.
    #[error("Unable to generate unique short code after {0} attempts.")]
    ExhaustedAttempts(u32),

    #[error(transparent)]
    Store(#[from] DomainError),
}

impl From<AllocationError> for DomainError {
    fn from(e: AllocationError) -> Self {
        match e {
            AllocationError::InvalidLength(length) => DomainError::InvalidLength(length),
            AllocationError::ExhaustedAttempts(_) => DomainError::CodeGenerationFailed,
            AllocationError::Store(inner) => inner,
        }
    }
}

/// Allocates short codes that are not yet present in the store.
///
/// The existence check and the caller's later insert are not atomic: two
/// allocators can hand out the same code concurrently. The store's unique
/// constraint on `short_code` is the final arbiter.
pub struct CodeAllocator {
    repository: Arc<dyn ShortUrlRepository>,
    default_length: i32,
}

impl CodeAllocator {
    /// Creates an allocator producing codes of `default_length` characters.
    pub fn new(repository: Arc<dyn ShortUrlRepository>, default_length: i32) -> Self {
        Self {
            repository,
            default_length,
        }
    }

    /// Length used by [`Self::allocate_default`].
    pub fn default_length(&self) -> i32 {
        self.default_length
    }

    /// Allocates a code of the configured default length.
    ///
    /// # Errors
    ///
    /// See [`Self::allocate`].
    pub async fn allocate_default(&self) -> Result<String, AllocationError> {
        self.allocate(self.default_length).await
    }

    /// Allocates a code of `length` characters.
    ///
    /// Tries up to [`MAX_ATTEMPTS`] random candidates, checking each against the
    /// store's unique index, and returns the first one that is free.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::InvalidLength`] if `length <= 0`; the store is
    /// not touched in that case.
    /// Returns [`AllocationError::ExhaustedAttempts`] after [`MAX_ATTEMPTS`] collisions.
    /// Returns [`AllocationError::Store`] if an existence check fails.
    pub async fn allocate(&self, length: i32) -> Result<String, AllocationError> {
        traced(
            "allocate_short_code",
            json!({ "length": length }),
            self.allocate_unique(length),
        )
        .await
    }

    async fn allocate_unique(&self, length: i32) -> Result<String, AllocationError> {
        let size = usize::try_from(length)
            .ok()
            .filter(|size| *size > 0)
            .ok_or(AllocationError::InvalidLength(length))?;

        for attempt in 1..=MAX_ATTEMPTS {
            let candidate = generate_code(size);

            if !self.repository.exists_by_code(&candidate).await? {
                return Ok(candidate);
            }

            metrics::counter!("short_code_collisions_total").increment(1);
            tracing::debug!(attempt, "Short code collision, retrying");
        }

        metrics::counter!("short_code_exhausted_total").increment(1);
        Err(AllocationError::ExhaustedAttempts(MAX_ATTEMPTS))
    }
}
