//! # SessionView
//!
//! Map-style view over a host-managed session store.
//!
//! The host (a web framework, a request handler) owns the session store and
//! its lifecycle. A [`SessionView`] binds to that store for the duration of a
//! request and offers:
//!
//! - map access: `get`, `set`, `has`, `unset`/`delete`, `destroy`
//! - enumeration that hides bookkeeping keys: `count`, `iter`, `keys`
//! - read-once (flash) values: `once`, `get_once`, `get_all_once`
//! - idle-timeout refresh through an expiry sentinel key
//!
//! ## Quick Start
//!
//! ```
//! use sessionview::prelude::*;
//!
//! let store = SessionStore::new();
//!
//! {
//!     let session = SessionView::open(&store)?;
//!     session.set("user", "alice");
//!     session.once("flash", "Profile saved");
//! } // dropped: expiry sentinel refreshed
//!
//! let session = SessionView::open(&store)?;
//! assert_eq!(session.get_once("flash"), Some(Value::from("Profile saved")));
//! assert_eq!(session.get_once("flash"), None);
//! assert_eq!(session.count(), 1);
//! # Ok::<(), sessionview::Error>(())
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod iter;
mod once;
mod types;
mod view;

pub mod prelude;

// Re-export main entry points
pub use view::{SessionView, SessionViewBuilder};
pub use config::{BindingMode, SessionConfig};
pub use error::{Error, Result};
pub use iter::Iter;

// Re-export types
pub use types::*;
