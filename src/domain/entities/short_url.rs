//! Short URL entity mapping a generated code to an original URL.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A persisted short URL entry.
///
/// All fields are immutable after creation. `created_by_username` is not part of
/// the stored row; it is filled in by repository joins for display purposes and
/// is `None` when the owning account could not be joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortUrl {
    pub id: Uuid,
    pub original_url: String,
    pub short_code: String,
    pub created_by_user_id: Uuid,
    pub created_by_username: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ShortUrl {
    /// Returns true if the entry cannot be served.
    ///
    /// A blank original URL marks a placeholder or corrupt row, which is treated
    /// exactly like an absent entry.
    pub fn is_blank(&self) -> bool {
        self.original_url.trim().is_empty()
    }

    /// Display name of the creator, falling back to `"Unknown"`.
    pub fn creator_display_name(&self) -> &str {
        self.created_by_username.as_deref().unwrap_or("Unknown")
    }
}

/// Input data for inserting a new short URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortUrl {
    pub id: Uuid,
    pub original_url: String,
    pub short_code: String,
    pub created_by_user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl NewShortUrl {
    /// Builds an entry with a fresh id and the current UTC timestamp.
    pub fn new(original_url: String, short_code: String, created_by_user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            original_url,
            short_code,
            created_by_user_id,
            created_at: Utc::now(),
        }
    }

    /// Converts the insert payload into the stored entity.
    pub fn into_short_url(self, created_by_username: Option<String>) -> ShortUrl {
        ShortUrl {
            id: self.id,
            original_url: self.original_url,
            short_code: self.short_code,
            created_by_user_id: self.created_by_user_id,
            created_by_username,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_short_url_generates_id_and_timestamp() {
        let owner = Uuid::new_v4();
        let before = Utc::now();
        let a = NewShortUrl::new("https://example.com".into(), "abcdEFGH".into(), owner);
        let b = NewShortUrl::new("https://example.com".into(), "abcdEFGH".into(), owner);

        assert_ne!(a.id, b.id);
        assert!(a.created_at >= before);
        assert_eq!(a.created_by_user_id, owner);
    }

    #[test]
    fn test_blank_original_url() {
        let entry = NewShortUrl::new("   ".into(), "abcdEFGH".into(), Uuid::new_v4())
            .into_short_url(None);
        assert!(entry.is_blank());
        assert_eq!(entry.creator_display_name(), "Unknown");
    }

    #[test]
    fn test_creator_display_name() {
        let entry = NewShortUrl::new("https://a.com".into(), "abcdEFGH".into(), Uuid::new_v4())
            .into_short_url(Some("alice".into()));
        assert!(!entry.is_blank());
        assert_eq!(entry.creator_display_name(), "alice");
    }
}
