//! Short code generation.
//!
//! Codes are drawn from the 62-character alphanumeric alphabet using the
//! operating system's cryptographically secure random source, so they cannot
//! be predicted or enumerated from previously issued codes.

/// Alphabet used for generated codes: lowercase, uppercase, then digits.
pub const ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default length of generated codes.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Generates a random code of exactly `length` characters.
///
/// Each random byte is reduced modulo 62 to pick a character. No rejection
/// sampling is done, so the first `256 % 62 = 8` characters of [`ALPHABET`]
/// (`a`..=`h`) are slightly more likely than the rest (5/256 vs 4/256).
///
/// Callers are responsible for rejecting a zero length; there is no upper bound.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(8);
/// assert_eq!(code.len(), 8);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut buffer = vec![0u8; length];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    buffer
        .into_iter()
        .map(|b| ALPHABET[b as usize % ALPHABET.len()] as char)
        .collect()
}
