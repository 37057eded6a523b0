//! One-shot startup phase seeding roles, the admin account, the about record,
//! and optional demo data.
//!
//! Each step is idempotent: running the phase against an already seeded store
//! changes nothing.

use serde_json::json;
use std::sync::Arc;

use crate::application::services::{AboutService, AccountService, ShortUrlService};
use crate::application::traced::traced;
use crate::domain::DomainError;
use crate::domain::entities::{Account, Role};
use crate::domain::repositories::{AccountRepository, ShortUrlRepository};

/// Number of demo users, and of demo URLs per user.
pub const DEMO_USERS: u32 = 4;
pub const DEMO_URLS_PER_USER: u32 = 4;

/// Password shared by all demo accounts.
pub const DEMO_PASSWORD: &str = "demo-password";

/// Initial about text describing how short codes are produced.
pub const ALGORITHM_DESCRIPTION: &str = "\
The short URL code is generated using a cryptographically secure random byte generator. \
Each code consists of uppercase letters, lowercase letters, and digits, with a default length of 8 characters.

For every attempt, the system checks the database to ensure the generated code is unique. \
If a unique code is found, it is returned immediately. \
If the code already exists, the generator retries, up to 10 attempts in total. \
If all 10 attempts fail to produce a unique code, creation fails with a code generation error.";

/// Credentials of the account seeded with the `Admin` role.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// What the startup phase should seed.
#[derive(Debug, Clone, Default)]
pub struct SeedConfig {
    pub admin: Option<AdminSeed>,
    pub demo_data: bool,
}

pub struct Bootstrap {
    accounts: Arc<dyn AccountRepository>,
    short_urls: Arc<dyn ShortUrlRepository>,
    account_service: Arc<AccountService>,
    about_service: Arc<AboutService>,
    short_url_service: Arc<ShortUrlService>,
}

impl Bootstrap {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        short_urls: Arc<dyn ShortUrlRepository>,
        account_service: Arc<AccountService>,
        about_service: Arc<AboutService>,
        short_url_service: Arc<ShortUrlService>,
    ) -> Self {
        Self {
            accounts,
            short_urls,
            account_service,
            about_service,
            short_url_service,
        }
    }

    /// Runs every configured seeding step in order.
    ///
    /// # Errors
    ///
    /// Stops at the first failing step and returns its error.
    pub async fn run(&self, config: &SeedConfig) -> Result<(), DomainError> {
        self.seed_roles().await?;

        match &config.admin {
            Some(admin) => {
                self.seed_admin(admin).await?;
                self.seed_about(&admin.email).await?;
            }
            None => tracing::info!("No admin credentials configured, skipping admin seeding"),
        }

        if config.demo_data {
            self.seed_demo_data().await?;
        }

        Ok(())
    }

    /// Ensures every [`Role`] exists.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::RoleCreationFailed`] if a role cannot be stored.
    pub async fn seed_roles(&self) -> Result<(), DomainError> {
        traced("seed_roles", json!({}), async {
            for role in Role::ALL {
                if !self.accounts.role_exists(role).await? {
                    self.accounts.create_role(role).await.map_err(|e| match e {
                        DomainError::RoleCreationFailed(_) => e,
                        other => DomainError::RoleCreationFailed(other.to_string()),
                    })?;
                    tracing::info!(%role, "Created role");
                }
            }
            Ok(())
        })
        .await
    }

    /// Creates the admin account unless one with the same email exists.
    pub async fn seed_admin(&self, admin: &AdminSeed) -> Result<Account, DomainError> {
        traced(
            "seed_admin",
            json!({ "email": admin.email, "username": admin.username }),
            async {
                if let Some(existing) = self.account_service.find_by_email(&admin.email).await? {
                    return Ok(existing);
                }

                self.account_service
                    .provision(&admin.email, &admin.username, &admin.password, Role::Admin)
                    .await
            },
        )
        .await
    }

    /// Stores the algorithm description unless an about record exists.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::AdminNotFound`] if no account has `admin_email`.
    pub async fn seed_about(&self, admin_email: &str) -> Result<(), DomainError> {
        traced(
            "seed_about",
            json!({ "admin_email": admin_email }),
            async {
                let admin = self
                    .account_service
                    .find_by_email(admin_email)
                    .await?
                    .ok_or(DomainError::AdminNotFound)?;

                self.about_service
                    .initialize(ALGORITHM_DESCRIPTION, admin.id)
                    .await?;
                Ok(())
            },
        )
        .await
    }

    /// Ensures demo users `user1..user4`, each owning four demo URLs.
    ///
    /// URLs are only created for demo users that own none.
    pub async fn seed_demo_data(&self) -> Result<(), DomainError> {
        traced("seed_demo_data", json!({ "users": DEMO_USERS }), async {
            for i in 1..=DEMO_USERS {
                let email = format!("user{}@example.com", i);
                let user = match self.account_service.find_by_email(&email).await? {
                    Some(user) => user,
                    None => {
                        self.account_service
                            .provision(&email, &format!("user{}", i), DEMO_PASSWORD, Role::User)
                            .await?
                    }
                };

                if self.short_urls.count_by_owner(user.id).await? > 0 {
                    continue;
                }

                for j in 1..=DEMO_URLS_PER_USER {
                    let url = format!("https://starlink.com/user{}/link{}", i, j);
                    match self.short_url_service.create(&url, user.id).await {
                        Ok(_) | Err(DomainError::DuplicateUrl) => {}
                        Err(e) => return Err(e),
                    }
                }
            }
            Ok(())
        })
        .await
    }
}
