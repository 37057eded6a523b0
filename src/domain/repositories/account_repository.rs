//! Repository trait for the account directory.

use crate::domain::entities::{Account, NewAccount, Role};
use crate::domain::error::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for accounts and roles.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAccountRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryStore`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError>;

    /// Creates an account without a role.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UserCreationFailed`] if the email or username is taken.
    /// Returns [`DomainError::Unexpected`] on other database errors.
    async fn create(&self, new_account: NewAccount) -> Result<Account, DomainError>;

    /// Assigns a role to an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::RoleAssignmentFailed`] if the account or role does not exist.
    async fn assign_role(&self, account_id: Uuid, role: Role) -> Result<(), DomainError>;

    async fn role_exists(&self, role: Role) -> Result<bool, DomainError>;

    /// Creates a role.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::RoleCreationFailed`] if the role could not be stored.
    async fn create_role(&self, role: Role) -> Result<(), DomainError>;

    /// Lists all accounts ordered by creation time.
    async fn list(&self) -> Result<Vec<Account>, DomainError>;
}
