//! DTOs for short URL endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::application::services::{PublicShortUrl, ShortUrlListing};
use crate::domain::entities::ShortUrl;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShortUrlRequest {
    /// The original URL to shorten (must be an absolute HTTP/HTTPS URL).
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateShortUrlResponse {
    pub id: Uuid,
}

/// Full entry, visible to authenticated callers.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortUrlResponse {
    pub id: Uuid,
    pub original_url: String,
    pub short_code: String,
    pub created_by_user_id: Uuid,
    pub created_by_username: String,
    pub created_at: DateTime<Utc>,
}

impl From<ShortUrl> for ShortUrlResponse {
    fn from(entry: ShortUrl) -> Self {
        let created_by_username = entry.creator_display_name().to_string();
        Self {
            id: entry.id,
            original_url: entry.original_url,
            short_code: entry.short_code,
            created_by_user_id: entry.created_by_user_id,
            created_by_username,
            created_at: entry.created_at,
        }
    }
}

/// Public entry, without identifiers.
#[derive(Debug, Serialize, Deserialize)]
pub struct PublicShortUrlResponse {
    pub original_url: String,
    pub short_code: String,
    pub created_by_username: String,
    pub created_at: DateTime<Utc>,
}

impl From<PublicShortUrl> for PublicShortUrlResponse {
    fn from(entry: PublicShortUrl) -> Self {
        Self {
            original_url: entry.original_url,
            short_code: entry.short_code,
            created_by_username: entry.created_by_username,
            created_at: entry.created_at,
        }
    }
}

/// One row of the listing.
///
/// Uses untagged enum so each row is a plain object; anonymous rows simply lack
/// the `id` and `created_by_user_id` fields.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ShortUrlListItem {
    Full(ShortUrlResponse),
    Public(PublicShortUrlResponse),
}

impl From<ShortUrlListing> for ShortUrlListItem {
    fn from(listing: ShortUrlListing) -> Self {
        match listing {
            ShortUrlListing::Full(entry) => Self::Full(entry.into()),
            ShortUrlListing::Public(entry) => Self::Public(entry.into()),
        }
    }
}
