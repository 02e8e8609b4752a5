//! Store-level error types.

use thiserror::Error;

/// Failures raised when a session store cannot be obtained or written back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The host ended the session; the store no longer accepts bindings
    #[error("session store is closed")]
    Closed,

    /// The host could not start a session
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
