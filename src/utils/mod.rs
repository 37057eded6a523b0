//! Utility functions for code generation, URL checks and credential handling.
//!
//! - [`code_generator`] - Cryptographically random short code generation
//! - [`url_check`] - Boundary validation of submitted URLs
//! - [`password`] - Salted password hashing

pub mod code_generator;
pub mod password;
pub mod url_check;
