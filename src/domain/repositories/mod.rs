//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`ShortUrlRepository`] - Short URL store (unique on code and original URL)
//! - [`AccountRepository`] - Account directory and roles
//! - [`AboutRepository`] - About-info singleton

pub mod about_repository;
pub mod account_repository;
pub mod short_url_repository;

pub use about_repository::AboutRepository;
pub use account_repository::AccountRepository;
pub use short_url_repository::ShortUrlRepository;

#[cfg(test)]
pub use about_repository::MockAboutRepository;
#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use short_url_repository::MockShortUrlRepository;
