//! In-memory store with the same uniqueness semantics as the PostgreSQL schema.
//!
//! Used by integration tests and for running the service without a database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use crate::domain::DomainError;
use crate::domain::entities::{AboutInfo, Account, NewAccount, NewShortUrl, Role, ShortUrl};
use crate::domain::repositories::{AboutRepository, AccountRepository, ShortUrlRepository};

#[derive(Debug, Clone)]
struct StoredAbout {
    description: String,
    last_updated: DateTime<Utc>,
    updated_by_id: Uuid,
}

#[derive(Default)]
struct Tables {
    short_urls: BTreeMap<Uuid, ShortUrl>,
    // Unique indexes over `short_urls`, kept in step by `create` and `delete`.
    codes: HashMap<String, Uuid>,
    urls: HashMap<String, Uuid>,
    accounts: BTreeMap<Uuid, Account>,
    roles: HashSet<Role>,
    about: Option<StoredAbout>,
}

impl Tables {
    fn username_of(&self, id: Uuid) -> Option<String> {
        self.accounts.get(&id).map(|a| a.username.clone())
    }

    fn require_account(&self, id: Uuid) -> Result<(), DomainError> {
        if self.accounts.contains_key(&id) {
            Ok(())
        } else {
            Err(DomainError::Unexpected(format!("account {} does not exist", id)))
        }
    }

    /// Entry as a joined read would return it.
    fn joined(&self, entry: &ShortUrl) -> ShortUrl {
        ShortUrl {
            created_by_username: self.username_of(entry.created_by_user_id),
            ..entry.clone()
        }
    }
}

/// Single mutex-guarded store implementing every repository trait.
///
/// Each call takes the lock once, so check-and-insert inside one call is atomic
/// just like a unique constraint.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, DomainError> {
        self.tables
            .lock()
            .map_err(|_| DomainError::Unexpected("mutex poisoned".into()))
    }
}

#[async_trait]
impl ShortUrlRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShortUrl>, DomainError> {
        let tables = self.lock()?;
        Ok(tables.short_urls.get(&id).map(|e| tables.joined(e)))
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<ShortUrl>, DomainError> {
        let tables = self.lock()?;
        Ok(tables
            .codes
            .get(short_code)
            .and_then(|id| tables.short_urls.get(id))
            .map(|e| tables.joined(e)))
    }

    async fn exists_by_code(&self, short_code: &str) -> Result<bool, DomainError> {
        let tables = self.lock()?;
        Ok(tables.codes.contains_key(short_code))
    }

    async fn exists_by_original_url(&self, original_url: &str) -> Result<bool, DomainError> {
        let tables = self.lock()?;
        Ok(tables.urls.contains_key(original_url))
    }

    async fn create(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, DomainError> {
        let mut tables = self.lock()?;

        if tables.codes.contains_key(&new_short_url.short_code) {
            return Err(DomainError::CodeConflict);
        }
        if tables.urls.contains_key(&new_short_url.original_url) {
            return Err(DomainError::DuplicateUrl);
        }
        tables.require_account(new_short_url.created_by_user_id)?;

        let username = tables.username_of(new_short_url.created_by_user_id);
        let entry = new_short_url.into_short_url(username);
        tables.codes.insert(entry.short_code.clone(), entry.id);
        tables.urls.insert(entry.original_url.clone(), entry.id);
        tables.short_urls.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.lock()?;
        let Some(entry) = tables.short_urls.remove(&id) else {
            return Ok(false);
        };
        tables.codes.remove(&entry.short_code);
        tables.urls.remove(&entry.original_url);
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<ShortUrl>, DomainError> {
        let tables = self.lock()?;
        let mut entries: Vec<ShortUrl> = tables
            .short_urls
            .values()
            .map(|e| tables.joined(e))
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(entries)
    }

    async fn count_by_owner(&self, owner_id: Uuid) -> Result<i64, DomainError> {
        let tables = self.lock()?;
        Ok(tables
            .short_urls
            .values()
            .filter(|e| e.created_by_user_id == owner_id)
            .count() as i64)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let tables = self.lock()?;
        Ok(tables.short_urls.len() as i64)
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let tables = self.lock()?;
        Ok(tables.accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let tables = self.lock()?;
        Ok(tables.accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let tables = self.lock()?;
        Ok(tables
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn create(&self, new_account: NewAccount) -> Result<Account, DomainError> {
        let mut tables = self.lock()?;

        if tables.accounts.values().any(|a| a.email == new_account.email) {
            return Err(DomainError::UserCreationFailed(
                "Email is already taken.".to_string(),
            ));
        }
        if tables
            .accounts
            .values()
            .any(|a| a.username == new_account.username)
        {
            return Err(DomainError::UserCreationFailed(
                "Username is already taken.".to_string(),
            ));
        }

        let account = Account {
            id: Uuid::new_v4(),
            email: new_account.email,
            username: new_account.username,
            password_hash: new_account.password_hash,
            role: None,
            created_at: Utc::now(),
        };
        tables.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn assign_role(&self, account_id: Uuid, role: Role) -> Result<(), DomainError> {
        let mut tables = self.lock()?;

        if !tables.roles.contains(&role) {
            return Err(DomainError::RoleAssignmentFailed(format!(
                "role {} does not exist",
                role
            )));
        }

        let account = tables.accounts.get_mut(&account_id).ok_or_else(|| {
            DomainError::RoleAssignmentFailed(format!("account {} does not exist", account_id))
        })?;
        account.role = Some(role);
        Ok(())
    }

    async fn role_exists(&self, role: Role) -> Result<bool, DomainError> {
        let tables = self.lock()?;
        Ok(tables.roles.contains(&role))
    }

    async fn create_role(&self, role: Role) -> Result<(), DomainError> {
        let mut tables = self.lock()?;
        tables.roles.insert(role);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Account>, DomainError> {
        let tables = self.lock()?;
        let mut accounts: Vec<Account> = tables.accounts.values().cloned().collect();
        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(accounts)
    }
}

#[async_trait]
impl AboutRepository for InMemoryStore {
    async fn get(&self) -> Result<Option<AboutInfo>, DomainError> {
        let tables = self.lock()?;
        Ok(tables.about.as_ref().map(|about| AboutInfo {
            description: about.description.clone(),
            last_updated: about.last_updated,
            updated_by_id: about.updated_by_id,
            updated_by_username: tables.username_of(about.updated_by_id),
        }))
    }

    async fn upsert(
        &self,
        description: &str,
        updated_by_id: Uuid,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut tables = self.lock()?;
        tables.require_account(updated_by_id)?;
        tables.about = Some(StoredAbout {
            description: description.to_string(),
            last_updated: updated_at,
            updated_by_id,
        });
        Ok(())
    }

    async fn insert_if_absent(
        &self,
        description: &str,
        updated_by_id: Uuid,
        updated_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut tables = self.lock()?;
        if tables.about.is_some() {
            return Ok(false);
        }
        tables.require_account(updated_by_id)?;
        tables.about = Some(StoredAbout {
            description: description.to_string(),
            last_updated: updated_at,
            updated_by_id,
        });
        Ok(true)
    }
}
