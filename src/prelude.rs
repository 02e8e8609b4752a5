//! Convenient imports for SessionView.
//!
//! ```
//! use sessionview::prelude::*;
//!
//! let store = SessionStore::new();
//! let session = SessionView::open(&store)?;
//! session.set("key", "value");
//! # Ok::<(), sessionview::Error>(())
//! ```

// Main entry point
pub use crate::view::{SessionView, SessionViewBuilder};

// Configuration
pub use crate::config::{BindingMode, SessionConfig};

// Error handling
pub use crate::error::{Error, Result};

// Core types
pub use crate::types::{InMemoryHost, Map, SessionData, SessionHost, SessionStore, Value};
