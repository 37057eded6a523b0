//! Shared application state injected into every handler.

use chrono::Duration;
use std::sync::Arc;

use crate::application::bootstrap::Bootstrap;
use crate::application::services::{AboutService, AccountService, ShortUrlService, TokenService};
use crate::infrastructure::persistence::Repositories;
use crate::utils::password::PasswordHasher;

/// Settings for issuing bearer tokens.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

#[derive(Clone)]
pub struct AppState {
    pub short_url_service: Arc<ShortUrlService>,
    pub account_service: Arc<AccountService>,
    pub about_service: Arc<AboutService>,
    repositories: Repositories,
}

impl AppState {
    /// Wires every service on top of `repositories`.
    ///
    /// `password_iterations` is the PBKDF2 work factor for newly stored hashes.
    pub fn new(
        repositories: Repositories,
        tokens: &TokenSettings,
        code_length: i32,
        password_iterations: u32,
    ) -> Self {
        let token_service = TokenService::new(
            &tokens.secret,
            tokens.issuer.clone(),
            tokens.audience.clone(),
            tokens.ttl,
        );

        Self {
            short_url_service: Arc::new(ShortUrlService::new(
                Arc::clone(&repositories.short_urls),
                code_length,
            )),
            account_service: Arc::new(AccountService::new(
                Arc::clone(&repositories.accounts),
                token_service,
                PasswordHasher::new(password_iterations),
            )),
            about_service: Arc::new(AboutService::new(Arc::clone(&repositories.about))),
            repositories,
        }
    }

    /// Startup seeding phase sharing this state's services.
    pub fn bootstrap(&self) -> Bootstrap {
        Bootstrap::new(
            Arc::clone(&self.repositories.accounts),
            Arc::clone(&self.repositories.short_urls),
            Arc::clone(&self.account_service),
            Arc::clone(&self.about_service),
            Arc::clone(&self.short_url_service),
        )
    }
}
