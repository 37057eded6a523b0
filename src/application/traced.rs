//! Uniform logging decoration for service operations.
//!
//! Every public service operation runs its body through [`traced`], which logs
//! the start, the success, or the failure with the operation's arguments, and
//! hands the result back untouched.

use serde_json::Value;
use std::fmt::Display;
use std::future::Future;

use crate::application::services::code_allocator::AllocationError;
use crate::domain::DomainError;

/// Errors that can pass through [`traced`].
pub trait OperationError: Display {
    /// Whether the failure should be logged as an operational anomaly.
    fn is_anomaly(&self) -> bool;
}

impl OperationError for DomainError {
    fn is_anomaly(&self) -> bool {
        DomainError::is_anomaly(self)
    }
}

impl OperationError for AllocationError {
    fn is_anomaly(&self) -> bool {
        match self {
            AllocationError::Store(inner) => inner.is_anomaly(),
            AllocationError::InvalidLength(_) | AllocationError::ExhaustedAttempts(_) => true,
        }
    }
}

/// Runs `operation` with start/success/failure logging.
///
/// `args` carries the loggable arguments of the call and is attached to the
/// start and failure records. The error value is returned exactly as produced.
///
/// # Example Logs
///
/// ```text
/// INFO  operation="resolve" args={"short_code":"aB3dE9xZ"}: Starting resolve
/// WARN  operation="resolve" args={"short_code":"aB3dE9xZ"} error=Short URL not found.: resolve failed
/// ```
pub async fn traced<T, E, F>(operation: &'static str, args: Value, future: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: OperationError,
{
    tracing::info!(operation, %args, "Starting {}", operation);

    match future.await {
        Ok(value) => {
            tracing::info!(operation, "{} succeeded", operation);
            Ok(value)
        }
        Err(err) => {
            if err.is_anomaly() {
                tracing::error!(operation, %args, error = %err, "{} failed", operation);
            } else {
                tracing::warn!(operation, %args, error = %err, "{} failed", operation);
            }
            Err(err)
        }
    }
}
