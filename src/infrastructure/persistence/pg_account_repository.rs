//! PostgreSQL implementation of the account directory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::DomainError;
use crate::domain::entities::{Account, NewAccount, Role};
use crate::domain::repositories::AccountRepository;

pub struct PgAccountRepository {
    pool: Arc<PgPool>,
}

impl PgAccountRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    email: String,
    username: String,
    password_hash: String,
    role: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = DomainError;

    fn try_from(r: AccountRow) -> Result<Self, Self::Error> {
        let role = r
            .role
            .map(|name| name.parse::<Role>())
            .transpose()
            .map_err(DomainError::Unexpected)?;

        Ok(Account {
            id: r.id,
            email: r.email,
            username: r.username,
            password_hash: r.password_hash,
            role,
            created_at: r.created_at,
        })
    }
}

const ACCOUNT_COLUMNS: &str = "id, email, username, password_hash, role, created_at";

impl PgAccountRepository {
    async fn find_one(&self, column: &str, value: &str) -> Result<Option<Account>, DomainError> {
        let sql = format!(
            "SELECT {} FROM accounts WHERE {} = $1",
            ACCOUNT_COLUMNS, column
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(value)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Account::try_from).transpose()
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let sql = format!("SELECT {} FROM accounts WHERE id = $1", ACCOUNT_COLUMNS);
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Account::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.find_one("email", email).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        self.find_one("username", username).await
    }

    async fn create(&self, new_account: NewAccount) -> Result<Account, DomainError> {
        let sql = format!(
            "INSERT INTO accounts (id, email, username, password_hash) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            ACCOUNT_COLUMNS
        );
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&new_account.email)
            .bind(&new_account.username)
            .bind(&new_account.password_hash)
            .fetch_one(self.pool.as_ref())
            .await?;

        row.try_into()
    }

    async fn assign_role(&self, account_id: Uuid, role: Role) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE accounts SET role = $2 WHERE id = $1")
            .bind(account_id)
            .bind(role.as_str())
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| DomainError::RoleAssignmentFailed(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RoleAssignmentFailed(format!(
                "account {} does not exist",
                account_id
            )));
        }

        Ok(())
    }

    async fn role_exists(&self, role: Role) -> Result<bool, DomainError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM roles WHERE name = $1)")
                .bind(role.as_str())
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn create_role(&self, role: Role) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO roles (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(role.as_str())
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| DomainError::RoleCreationFailed(e.to_string()))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Account>, DomainError> {
        let sql = format!(
            "SELECT {} FROM accounts ORDER BY created_at, id",
            ACCOUNT_COLUMNS
        );
        let rows = sqlx::query_as::<_, AccountRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter().map(Account::try_from).collect()
    }
}
