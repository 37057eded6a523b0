//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls
//! and business rules. Services consume repository traits and provide a clean
//! API for HTTP handlers, the startup phase, and the operator CLI.
//!
//! # Available Services
//!
//! - [`services::CodeAllocator`] - Collision-checked short code allocation
//! - [`services::ShortUrlService`] - Short URL create/resolve/list/delete
//! - [`services::AccountService`] - Registration, login, bearer authentication
//! - [`services::AboutService`] - About-info singleton
//!
//! Every public operation is wrapped by [`traced::traced`]; startup seeding
//! lives in [`bootstrap`].

pub mod bootstrap;
pub mod services;
pub mod traced;
