//! Core types for sessionview
//!
//! This crate defines the value model shared by the storage layer and the
//! public facade:
//! - [`Value`]: dynamic, serializable session value
//! - [`Map`]: insertion-ordered field map of object values

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod value;

pub use value::{Map, Value};
