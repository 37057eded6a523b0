//! Singleton record describing the short-code algorithm.

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutInfo {
    pub description: String,
    pub last_updated: DateTime<Utc>,
    pub updated_by_id: Uuid,
    /// Joined from the updating account.
    pub updated_by_username: Option<String>,
}
