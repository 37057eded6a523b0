//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures. Creation payloads live next to the
//! entity they produce:
//!
//! - [`ShortUrl`] / [`NewShortUrl`] - A short code mapped to an original URL
//! - [`Account`] / [`NewAccount`] - An entry in the account directory
//! - [`Identity`] - The caller resolved from a bearer credential
//! - [`AboutInfo`] - Singleton description of the allocation algorithm

pub mod about;
pub mod account;
pub mod short_url;

pub use about::AboutInfo;
pub use account::{Account, Identity, NewAccount, Role};
pub use short_url::{NewShortUrl, ShortUrl};
