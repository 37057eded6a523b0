//! HTTP middleware for request processing and protection.
//!
//! Provides authentication, rate limiting, panic capture and observability middleware.

pub mod auth;
pub mod panic;
pub mod rate_limit;
pub mod tracing;
