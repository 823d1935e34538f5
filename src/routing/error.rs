//! Batch-level routing errors.

use thiserror::Error;

/// The only failures a caller of the routing pipeline can observe.
///
/// Provider failures never appear here: they are absorbed by the fallback router.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// Missing start location or no destinations; rejected before any network call.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// The routing worker is not running or stopped mid-request.
    #[error("routing worker unavailable: {0}")]
    WorkerUnavailable(String),
}

/// Result type for batch routing.
pub type RoutingResult<T> = Result<T, RoutingError>;
