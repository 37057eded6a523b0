//! Business logic services for the application layer.

pub mod about_service;
pub mod account_service;
pub mod code_allocator;
pub mod short_url_service;
pub mod token_service;

pub use about_service::AboutService;
pub use account_service::{AccountService, AuthResponse, UserInfo};
pub use code_allocator::{AllocationError, CodeAllocator};
pub use short_url_service::{PublicShortUrl, ShortUrlListing, ShortUrlService};
pub use token_service::TokenService;
