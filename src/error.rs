//! Error types for SessionView.
//!
//! Only binding and teardown can fail. Reads and writes against a bound view
//! are total: a missing key yields a default, never an error.

use sessionview_storage::StoreError;
use thiserror::Error;

/// All SessionView errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The host store could not be obtained or started when opening a view
    #[error("store initialization failed: {0}")]
    StoreInitialization(String),

    /// The host closed the store before a detached view could write back
    #[error("session store closed before write-back")]
    StoreClosed,

    /// Configuration rejected (empty prefix, malformed TOML)
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for SessionView operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Map a store failure raised while binding a view
    pub(crate) fn from_binding(e: StoreError) -> Self {
        Error::StoreInitialization(e.to_string())
    }

    /// Map a store failure raised while writing a detached view back.
    ///
    /// Any refused write-back means the host session is gone.
    pub(crate) fn from_write_back(_: StoreError) -> Self {
        Error::StoreClosed
    }

    /// Check if this error happened while opening a view.
    pub fn is_initialization(&self) -> bool {
        matches!(self, Error::StoreInitialization(_))
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::InvalidConfig(e.to_string())
    }
}
