//! Storage layer for sessionview
//!
//! This crate models the host side of a session:
//! - SessionData: insertion-ordered map of keys to values
//! - SessionStore: shared, lockable handle to one session's entries
//! - SessionHost: the contract for obtaining a store, with an in-memory host

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod data;
pub mod error;
pub mod host;
pub mod store;

pub use data::{Position, SessionData};
pub use error::{StoreError, StoreResult};
pub use host::{InMemoryHost, SessionHost};
pub use store::SessionStore;
