//! Account directory: registration, login, identity resolution.

use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::services::token_service::TokenService;
use crate::application::traced::traced;
use crate::domain::DomainError;
use crate::domain::entities::{Account, Identity, NewAccount, Role};
use crate::domain::repositories::AccountRepository;
use crate::utils::password::PasswordHasher;

/// Result of a successful register or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    pub role: Role,
}

/// Profile of the calling account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInfo {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub role: Role,
}

impl From<Account> for UserInfo {
    fn from(account: Account) -> Self {
        let role = account.effective_role();
        Self {
            id: account.id,
            email: account.email,
            username: account.username,
            role,
        }
    }
}

pub struct AccountService {
    accounts: Arc<dyn AccountRepository>,
    tokens: TokenService,
    passwords: PasswordHasher,
}

impl AccountService {
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        tokens: TokenService,
        passwords: PasswordHasher,
    ) -> Self {
        Self {
            accounts,
            tokens,
            passwords,
        }
    }

    /// Registers a new account with the `User` role and signs it in.
    ///
    /// # Errors
    ///
    /// - [`DomainError::UserCreationFailed`] if the email or username is taken
    /// - [`DomainError::RoleAssignmentFailed`] if the role cannot be assigned
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthResponse, DomainError> {
        traced(
            "register",
            json!({ "email": email, "username": username }),
            async {
                let account = self
                    .create_with_role(email, username, password, Role::User)
                    .await?;
                self.sign_in(&account)
            },
        )
        .await
    }

    /// Signs in with email and password.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller,
    /// including in timing: a missing account still pays for one verification.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCredentials`] on any mismatch.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, DomainError> {
        traced("login", json!({ "email": email }), async {
            let Some(account) = self.accounts.find_by_email(email).await? else {
                self.passwords.verify_dummy(password);
                return Err(DomainError::InvalidCredentials);
            };

            if !self.passwords.verify(password, &account.password_hash) {
                return Err(DomainError::InvalidCredentials);
            }

            self.sign_in(&account)
        })
        .await
    }

    /// Loads the profile behind a resolved identity.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UserNotFound`] if the account no longer exists.
    pub async fn current_user(&self, identity: &Identity) -> Result<UserInfo, DomainError> {
        traced(
            "current_user",
            json!({ "user_id": identity.user_id }),
            async {
                self.accounts
                    .find_by_id(identity.user_id)
                    .await?
                    .map(UserInfo::from)
                    .ok_or(DomainError::UserNotFound)
            },
        )
        .await
    }

    /// Resolves a bearer credential to the identity it carries.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCredentials`] for invalid or expired tokens.
    pub async fn authenticate(&self, bearer: &str) -> Result<Identity, DomainError> {
        traced("authenticate", json!({}), async { self.tokens.verify(bearer) }).await
    }

    /// Creates an account and assigns `role`, without signing in.
    ///
    /// Used by registration, startup seeding and the operator CLI.
    ///
    /// # Errors
    ///
    /// See [`Self::register`].
    pub async fn provision(
        &self,
        email: &str,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Account, DomainError> {
        traced(
            "provision_account",
            json!({ "email": email, "username": username, "role": role }),
            self.create_with_role(email, username, password, role),
        )
        .await
    }

    /// Looks up an account by email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        traced(
            "find_account_by_email",
            json!({ "email": email }),
            self.accounts.find_by_email(email),
        )
        .await
    }

    /// Lists all accounts.
    pub async fn list(&self) -> Result<Vec<Account>, DomainError> {
        traced("list_accounts", json!({}), self.accounts.list()).await
    }

    async fn create_with_role(
        &self,
        email: &str,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Account, DomainError> {
        if self.accounts.find_by_email(email).await?.is_some() {
            return Err(DomainError::UserCreationFailed(
                "Email is already taken.".to_string(),
            ));
        }
        if self.accounts.find_by_username(username).await?.is_some() {
            return Err(DomainError::UserCreationFailed(
                "Username is already taken.".to_string(),
            ));
        }

        let mut account = self
            .accounts
            .create(NewAccount {
                email: email.to_string(),
                username: username.to_string(),
                password_hash: self.passwords.hash(password),
            })
            .await?;

        self.accounts
            .assign_role(account.id, role)
            .await
            .map_err(|e| match e {
                DomainError::RoleAssignmentFailed(_) => e,
                other => DomainError::RoleAssignmentFailed(other.to_string()),
            })?;

        account.role = Some(role);
        Ok(account)
    }

    fn sign_in(&self, account: &Account) -> Result<AuthResponse, DomainError> {
        Ok(AuthResponse {
            token: self.tokens.issue(account)?,
            username: account.username.clone(),
            role: account.effective_role(),
        })
    }
}
