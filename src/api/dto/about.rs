//! DTOs for the about endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::AboutInfo;

#[derive(Debug, Serialize, Deserialize)]
pub struct AboutResponse {
    pub description: String,
    pub last_updated: DateTime<Utc>,
    pub updated_by: String,
}

impl From<AboutInfo> for AboutResponse {
    fn from(info: AboutInfo) -> Self {
        Self {
            description: info.description,
            last_updated: info.last_updated,
            updated_by: info
                .updated_by_username
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAboutRequest {
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    #[validate(custom(function = "not_blank"))]
    pub description: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Description is required".into()));
    }
    Ok(())
}
