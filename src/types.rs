//! Public types re-exported from the internal crates.

// Value model
pub use sessionview_core::{Map, Value};

// Host-side store types
pub use sessionview_storage::{InMemoryHost, SessionData, SessionHost, SessionStore, StoreError};
