//! Salted, stretched password hashing for the account directory.
//!
//! Stored format: `pbkdf2-sha256$<iterations>$<salt hex>$<hash hex>`.
//! The iteration count travels with each hash, so raising the work factor
//! never invalidates existing accounts.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

const SCHEME: &str = "pbkdf2-sha256";
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

/// Default PBKDF2-HMAC-SHA256 work factor.
pub const DEFAULT_ITERATIONS: u32 = 600_000;

fn derive(password: &str, salt: &[u8], iterations: u32) -> [u8; HASH_LEN] {
    let mut out = [0u8; HASH_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out);
    out
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[derive(Debug, Clone)]
pub struct PasswordHasher {
    iterations: u32,
    // Verified against when an account is missing, so that path costs the same.
    dummy: String,
}

impl PasswordHasher {
    /// # Panics
    ///
    /// Panics if the system random number generator fails.
    pub fn new(iterations: u32) -> Self {
        let iterations = iterations.max(1);
        let mut hasher = Self {
            iterations,
            dummy: String::new(),
        };
        let mut secret = [0u8; SALT_LEN];
        getrandom::fill(&mut secret).expect("Failed to generate random bytes");
        hasher.dummy = hasher.hash(&hex::encode(secret));
        hasher
    }

    /// Hashes a password with a fresh random salt.
    ///
    /// # Panics
    ///
    /// Panics if the system random number generator fails.
    pub fn hash(&self, password: &str) -> String {
        let mut salt = [0u8; SALT_LEN];
        getrandom::fill(&mut salt).expect("Failed to generate random bytes");

        let digest = derive(password, &salt, self.iterations);
        format!(
            "{}${}${}${}",
            SCHEME,
            self.iterations,
            hex::encode(salt),
            hex::encode(digest)
        )
    }

    /// Verifies a password against a stored hash in constant time.
    ///
    /// Malformed stored values never verify.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        let mut parts = stored.split('$');
        let (Some(SCHEME), Some(iterations), Some(salt_hex), Some(digest_hex), None) = (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) else {
            return false;
        };
        let (Ok(iterations), Ok(salt), Ok(digest)) = (
            iterations.parse::<u32>(),
            hex::decode(salt_hex),
            hex::decode(digest_hex),
        ) else {
            return false;
        };
        if iterations == 0 {
            return false;
        }

        constant_time_eq(&derive(password, &salt, iterations), &digest)
    }

    /// Runs a full verification that always fails. Used for unknown accounts.
    pub fn verify_dummy(&self, password: &str) -> bool {
        self.verify(password, &self.dummy)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_ITERATIONS)
    }
}
