//! SessionView Test Suite
//!
//! Integration tests for the public SessionView API.
//!
//! ## Modules
//!
//! - `basic_ops`: get / set / has / unset / delete / destroy
//! - `once_values`: read-once values and the once-bucket
//! - `enumeration`: count, iteration order, bookkeeping keys
//! - `lifecycle`: binding modes, teardown, expiry refresh, construction failures
//! - `scenarios`: end-to-end request flows
//! - `properties`: property-based checks

pub mod lifecycle;
pub mod properties;

pub use sessionview::prelude::*;

/// Key of the once-bucket under the default prefix
pub const ONCE_KEY: &str = "_&_session_once";

/// Key of the expiry sentinel under the default prefix
pub const SENTINEL_KEY: &str = "_&_session_random";

/// Both binding modes
pub const ALL_MODES: [BindingMode; 2] = [BindingMode::Live, BindingMode::Detached];

/// Run a test body once per binding mode
pub fn test_across_binding_modes<F>(test_fn: F)
where
    F: Fn(BindingMode),
{
    for mode in ALL_MODES {
        test_fn(mode);
    }
}

/// Open a view with the given binding and auto-refresh disabled
pub fn open_quiet(store: &SessionStore, mode: BindingMode) -> SessionView {
    SessionView::builder()
        .binding(mode)
        .auto_refresh(false)
        .open(store)
        .expect("open view")
}

/// Build an object value from pairs
pub fn obj<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Value::object(entries)
}
