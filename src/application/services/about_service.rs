//! About-info singleton.

use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::traced::traced;
use crate::domain::DomainError;
use crate::domain::entities::AboutInfo;
use crate::domain::repositories::AboutRepository;

pub struct AboutService {
    repository: Arc<dyn AboutRepository>,
}

impl AboutService {
    pub fn new(repository: Arc<dyn AboutRepository>) -> Self {
        Self { repository }
    }

    /// Loads the about record.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::AboutInfoNotFound`] if no record exists or it has
    /// no updating account.
    pub async fn get(&self) -> Result<AboutInfo, DomainError> {
        traced("get_about_info", json!({}), async {
            self.repository
                .get()
                .await?
                .filter(|info| !info.updated_by_id.is_nil())
                .ok_or(DomainError::AboutInfoNotFound)
        })
        .await
    }

    /// Replaces the description, stamping it with `updated_by` and the current time.
    pub async fn update(&self, description: &str, updated_by: Uuid) -> Result<(), DomainError> {
        traced(
            "update_about_info",
            json!({ "updated_by": updated_by, "length": description.chars().count() }),
            self.repository.upsert(description, updated_by, Utc::now()),
        )
        .await
    }

    /// Stores the description only if no record exists yet.
    ///
    /// Returns `true` if a record was inserted.
    pub async fn initialize(&self, description: &str, updated_by: Uuid) -> Result<bool, DomainError> {
        traced(
            "initialize_about_info",
            json!({ "updated_by": updated_by }),
            self.repository
                .insert_if_absent(description, updated_by, Utc::now()),
        )
        .await
    }
}
