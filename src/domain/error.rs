//! Closed taxonomy of domain failures.
//!
//! Every service operation returns `Result<T, DomainError>`. The kinds are fixed;
//! only the HTTP boundary ([`crate::error::AppError`]) translates them into
//! externally visible statuses.

/// Failure kinds raised by domain operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    // ── Short URLs ──────────────────────────────────────────────────────────
    #[error("Short URL not found.")]
    NotFound,

    #[error("This URL already exists.")]
    DuplicateUrl,

    #[error("Unable to generate unique short code after multiple attempts.")]
    CodeGenerationFailed,

    #[error("Short code length must be greater than 0, but was {0}.")]
    InvalidLength(i32),

    #[error("Empty short code passed.")]
    EmptyCode,

    #[error("You can only delete your own short URLs.")]
    ForbiddenDeletion,

    /// The store rejected an insert because the short code is already taken.
    ///
    /// Raised when two writers pass the allocator's pre-check with the same code.
    #[error("Short code is already taken.")]
    CodeConflict,

    // ── Accounts ────────────────────────────────────────────────────────────
    #[error("User not found.")]
    UserNotFound,

    #[error("Admin not found.")]
    AdminNotFound,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("User creation failed: {0}")]
    UserCreationFailed(String),

    #[error("Role creation failed: {0}")]
    RoleCreationFailed(String),

    #[error("Role assignment failed: {0}")]
    RoleAssignmentFailed(String),

    // ── About ───────────────────────────────────────────────────────────────
    #[error("About information not found.")]
    AboutInfoNotFound,

    /// Unexpected failure (storage, token encoding). The message is for
    /// server-side logs only.
    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}

impl DomainError {
    /// Returns true for failures that indicate an operational anomaly rather
    /// than a caller mistake.
    ///
    /// Anomalies are logged at `ERROR`; everything else at `WARN`.
    pub fn is_anomaly(&self) -> bool {
        matches!(
            self,
            Self::CodeGenerationFailed
                | Self::InvalidLength(_)
                | Self::CodeConflict
                | Self::RoleCreationFailed(_)
                | Self::RoleAssignmentFailed(_)
                | Self::Unexpected(_)
        )
    }
}

/// Unique constraint on `short_urls.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "short_urls_short_code_key";
/// Unique constraint on `short_urls.original_url`.
pub const ORIGINAL_URL_CONSTRAINT: &str = "short_urls_original_url_key";
/// Unique constraint on `accounts.email`.
pub const ACCOUNT_EMAIL_CONSTRAINT: &str = "accounts_email_key";
/// Unique constraint on `accounts.username`.
pub const ACCOUNT_USERNAME_CONSTRAINT: &str = "accounts_username_key";

impl From<sqlx::Error> for DomainError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return match db.constraint() {
                Some(SHORT_CODE_CONSTRAINT) => Self::CodeConflict,
                Some(ORIGINAL_URL_CONSTRAINT) => Self::DuplicateUrl,
                Some(ACCOUNT_EMAIL_CONSTRAINT) => {
                    Self::UserCreationFailed("Email is already taken.".to_string())
                }
                Some(ACCOUNT_USERNAME_CONSTRAINT) => {
                    Self::UserCreationFailed("Username is already taken.".to_string())
                }
                other => Self::Unexpected(format!("unique violation on {:?}", other)),
            };
        }

        Self::Unexpected(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_length_message_contains_value() {
        assert!(DomainError::InvalidLength(0).to_string().contains('0'));
        assert!(DomainError::InvalidLength(-1).to_string().contains("-1"));
    }

    #[test]
    fn test_code_generation_message_matches_http_message() {
        assert_eq!(
            DomainError::CodeGenerationFailed.to_string(),
            "Unable to generate unique short code after multiple attempts."
        );
    }

    #[test]
    fn test_anomaly_classification() {
        assert!(DomainError::CodeGenerationFailed.is_anomaly());
        assert!(DomainError::Unexpected("boom".into()).is_anomaly());
        assert!(!DomainError::NotFound.is_anomaly());
        assert!(!DomainError::ForbiddenDeletion.is_anomaly());
        assert!(!DomainError::InvalidCredentials.is_anomaly());
    }

    #[test]
    fn test_non_database_sqlx_error_is_unexpected() {
        let err: DomainError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, DomainError::Unexpected(_)));
    }
}
