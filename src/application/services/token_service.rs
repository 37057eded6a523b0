//! Bearer credential issuance and verification (HS256 JWT).

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;
use crate::domain::entities::{Account, Identity, Role};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    name: String,
    role: Role,
    jti: Uuid,
    iss: String,
    aud: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies bearer credentials carrying user id, username and role.
///
/// Tokens are stateless: verification checks signature, issuer, audience and
/// expiry only.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, issuer: String, audience: String, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            ttl,
        }
    }

    /// Issues a token for `account` with its effective role.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Unexpected`] if the expiry overflows or the token
    /// cannot be encoded.
    pub fn issue(&self, account: &Account) -> Result<String, DomainError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| DomainError::Unexpected("token lifetime out of range".to_string()))?;
        let claims = Claims {
            sub: account.id,
            name: account.username.clone(),
            role: account.effective_role(),
            jti: Uuid::new_v4(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::Unexpected(format!("token encoding failed: {}", e)))
    }

    /// Verifies a token and returns the identity it carries.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCredentials`] for malformed, forged,
    /// expired, or foreign (issuer/audience mismatch) tokens.
    pub fn verify(&self, token: &str) -> Result<Identity, DomainError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => tracing::debug!("Rejected expired token"),
                kind => tracing::debug!(?kind, "Rejected token"),
            }
            DomainError::InvalidCredentials
        })?;

        Ok(Identity {
            user_id: data.claims.sub,
            username: data.claims.name,
            role: data.claims.role,
        })
    }
}
