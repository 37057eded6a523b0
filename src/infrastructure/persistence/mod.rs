//! Repository implementations.
//!
//! Concrete implementations of the domain repository traits: PostgreSQL via
//! SQLx, and an in-memory store with identical uniqueness rules.
//!
//! # Repositories
//!
//! - [`PgShortUrlRepository`] - Short URL store
//! - [`PgAccountRepository`] - Accounts and roles
//! - [`PgAboutRepository`] - About-info singleton
//! - [`InMemoryStore`] - All of the above, in process memory

pub mod memory;
pub mod pg_about_repository;
pub mod pg_account_repository;
pub mod pg_short_url_repository;

pub use memory::InMemoryStore;
pub use pg_about_repository::PgAboutRepository;
pub use pg_account_repository::PgAccountRepository;
pub use pg_short_url_repository::PgShortUrlRepository;

use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::{AboutRepository, AccountRepository, ShortUrlRepository};

/// The set of repositories the services are wired with.
#[derive(Clone)]
pub struct Repositories {
    pub short_urls: Arc<dyn ShortUrlRepository>,
    pub accounts: Arc<dyn AccountRepository>,
    pub about: Arc<dyn AboutRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            short_urls: Arc::new(PgShortUrlRepository::new(Arc::clone(&pool))),
            accounts: Arc::new(PgAccountRepository::new(Arc::clone(&pool))),
            about: Arc::new(PgAboutRepository::new(pool)),
        }
    }

    /// Repositories backed by a single fresh [`InMemoryStore`].
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            short_urls: store.clone(),
            accounts: store.clone(),
            about: store,
        }
    }
}
