//! Domain layer containing business entities, repository contracts and the
//! failure taxonomy.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`error`] - Closed set of domain failure kinds
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on the presentation layer
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic lives in services (see [`crate::application::services`])

pub mod entities;
pub mod error;
pub mod repositories;

pub use error::DomainError;
