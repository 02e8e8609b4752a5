//! The session view.
//!
//! A [`SessionView`] wraps one host session store and exposes map-style
//! access to the user-visible keys. Keys starting with the configured prefix
//! are bookkeeping entries (the once-bucket, the expiry sentinel): they never
//! show up in [`count`](SessionView::count), [`iter`](SessionView::iter) or
//! [`keys`](SessionView::keys), and [`destroy`](SessionView::destroy) leaves
//! them alone.
//!
//! ## Teardown
//!
//! A view is torn down exactly once, by [`close`](SessionView::close) or when
//! it is dropped. Teardown refreshes the expiry sentinel when `auto_refresh`
//! is on, then writes a detached view's working copy back to the host store.

use crate::config::{BindingMode, SessionConfig};
use crate::error::{Error, Result};
use crate::iter::Iter;
use rand::Rng;
use sessionview_core::Value;
use sessionview_storage::{SessionData, SessionHost, SessionStore};

/// Suffix of the once-bucket key
pub(crate) const ONCE_SUFFIX: &str = "once";

/// Suffix of the expiry sentinel key
pub(crate) const SENTINEL_SUFFIX: &str = "random";

/// Map-style view over a host session store.
///
/// # Example
///
/// ```
/// use sessionview::prelude::*;
///
/// let store = SessionStore::from_entries([("a", "b")]);
/// let session = SessionView::open(&store)?;
///
/// assert_eq!(session.get("a"), Some(Value::from("b")));
/// session.set("user", "alice");
/// session.once("flash", "saved");
/// assert_eq!(session.count(), 2);
///
/// session.close()?;
/// assert!(store.contains_key("user"));
/// # Ok::<(), sessionview::Error>(())
/// ```
#[derive(Debug)]
pub struct SessionView {
    /// Store all operations run against: the host store when live, a
    /// private fork when detached
    pub(crate) store: SessionStore,

    /// Host store to write back to at teardown (detached only)
    write_back: Option<SessionStore>,

    auto_refresh: bool,
    prefix: String,
    pub(crate) once_key: String,
    sentinel_key: String,
    torn_down: bool,
}

impl SessionView {
    /// Open a view over `store` with default settings.
    ///
    /// Fails with [`Error::StoreInitialization`] if the host closed the store.
    pub fn open(store: &SessionStore) -> Result<Self> {
        Self::builder().open(store)
    }

    /// Ask `host` for its session store and open a view over it.
    pub fn open_from<H: SessionHost + ?Sized>(host: &H) -> Result<Self> {
        Self::builder().open_from(host)
    }

    /// Create a builder for view configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use sessionview::prelude::*;
    ///
    /// let store = SessionStore::new();
    /// let session = SessionView::builder()
    ///     .auto_refresh(false)
    ///     .detached()
    ///     .open(&store)?;
    /// # drop(session);
    /// # Ok::<(), sessionview::Error>(())
    /// ```
    pub fn builder() -> SessionViewBuilder {
        SessionViewBuilder::new()
    }

    fn bind(host_store: SessionStore, config: SessionConfig) -> Self {
        let (store, write_back) = match config.binding {
            BindingMode::Live => (host_store, None),
            BindingMode::Detached => (host_store.fork(), Some(host_store)),
        };
        tracing::debug!(
            prefix = %config.prefix,
            binding = ?config.binding,
            auto_refresh = config.auto_refresh,
            "session view opened"
        );
        Self {
            store,
            write_back,
            auto_refresh: config.auto_refresh,
            once_key: format!("{}{}", config.prefix, ONCE_SUFFIX),
            sentinel_key: format!("{}{}", config.prefix, SENTINEL_SUFFIX),
            prefix: config.prefix,
            torn_down: false,
        }
    }

    // =========================================================================
    // Key classification
    // =========================================================================

    /// The prefix reserving bookkeeping keys
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether `key` is a bookkeeping key hidden from enumeration
    #[inline]
    pub fn is_internal_key(&self, key: &str) -> bool {
        key.starts_with(self.prefix.as_str())
    }

    /// Key of the expiry sentinel
    pub fn sentinel_key(&self) -> &str {
        &self.sentinel_key
    }

    /// Whether this view works on a private copy of the host store
    pub fn is_detached(&self) -> bool {
        self.write_back.is_some()
    }

    // =========================================================================
    // Map access
    // =========================================================================

    /// Get a value.
    ///
    /// Returns `None` if the key is absent or holds `Null`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.store
            .read(|data| data.get(key).filter(|v| !v.is_null()).cloned())
    }

    /// Get a value, or `default` if the key is absent or holds `Null`.
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        self.get(key).unwrap_or_else(|| default.into())
    }

    /// Set a value, replacing any previous one.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.store.write(|data| data.insert(key, value));
    }

    /// Check if a key holds a non-`Null` value.
    pub fn has(&self, key: &str) -> bool {
        self.store
            .read(|data| data.get(key).map_or(false, |v| !v.is_null()))
    }

    /// Remove a key. Absent keys are ignored.
    pub fn unset(&self, key: &str) {
        self.delete(key);
    }

    /// Remove a key, returning `true` if it existed.
    pub fn delete(&self, key: &str) -> bool {
        self.store.write(|data| data.remove(key)).is_some()
    }

    /// Remove every user-visible key. Bookkeeping keys remain.
    pub fn destroy(&self) {
        let removed = self
            .store
            .write(|data| data.retain(|key, _| self.is_internal_key(key)));
        tracing::debug!(removed, "session destroyed");
    }

    // =========================================================================
    // Enumeration
    // =========================================================================

    /// Number of user-visible keys
    pub fn count(&self) -> usize {
        self.store.read(|data| {
            data.keys()
                .filter(|key| !self.is_internal_key(key))
                .count()
        })
    }

    /// Alias for [`count`](Self::count)
    pub fn len(&self) -> usize {
        self.count()
    }

    /// Check if there are no user-visible keys
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Iterate user-visible `(key, value)` pairs in store order.
    ///
    /// The iterator is lazy: each step reads the store afresh, so writes made
    /// while iterating are tolerated. It covers the keys present when it was
    /// created and always ends. Call `iter` again to restart.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// User-visible keys in store order
    pub fn keys(&self) -> Vec<String> {
        self.store.read(|data| {
            data.keys()
                .filter(|key| !self.is_internal_key(key))
                .map(str::to_string)
                .collect()
        })
    }

    /// Owned copy of the user-visible entries
    pub fn to_map(&self) -> SessionData {
        self.store.read(|data| {
            data.iter()
                .filter(|(key, _)| !self.is_internal_key(key))
                .map(|(key, value)| (key, value.clone()))
                .collect()
        })
    }

    // =========================================================================
    // Expiry
    // =========================================================================

    /// Overwrite the expiry sentinel with a fresh random integer.
    ///
    /// Touching the store this way makes the host see activity and push the
    /// session's idle timeout back.
    pub fn refresh_expire_time(&self) {
        let token: i64 = rand::thread_rng().gen();
        self.store
            .write(|data| data.insert(self.sentinel_key.as_str(), token));
        tracing::trace!(key = %self.sentinel_key, "session expiry refreshed");
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Tear the view down now, reporting write-back failures.
    ///
    /// Dropping the view does the same but can only log failures.
    pub fn close(mut self) -> Result<()> {
        self.teardown()
    }

    fn teardown(&mut self) -> Result<()> {
        if self.torn_down {
            return Ok(());
        }
        self.torn_down = true;

        if self.auto_refresh {
            self.refresh_expire_time();
        }
        if let Some(host_store) = self.write_back.take() {
            host_store
                .replace(self.store.snapshot())
                .map_err(Error::from_write_back)?;
        }
        tracing::debug!(auto_refresh = self.auto_refresh, "session view closed");
        Ok(())
    }
}

impl Drop for SessionView {
    fn drop(&mut self) {
        if let Err(e) = self.teardown() {
            tracing::warn!(error = %e, "session write-back dropped");
        }
    }
}

impl<'a> IntoIterator for &'a SessionView {
    type Item = (String, Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builder for [`SessionView`].
///
/// # Example
///
/// ```
/// use sessionview::prelude::*;
///
/// let host = InMemoryHost::new();
/// let session = SessionView::builder()
///     .prefix("_app_")
///     .auto_refresh(false)
///     .open_from(&host)?;
/// session.set("k", 1i64);
/// # Ok::<(), sessionview::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionViewBuilder {
    config: SessionConfig,
}

impl SessionViewBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all settings with `config`.
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable or disable the expiry refresh at teardown.
    pub fn auto_refresh(mut self, enabled: bool) -> Self {
        self.config.auto_refresh = enabled;
        self
    }

    /// Set the prefix reserving bookkeeping keys.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.prefix = prefix.into();
        self
    }

    /// Set the binding mode.
    pub fn binding(mut self, binding: BindingMode) -> Self {
        self.config.binding = binding;
        self
    }

    /// Bind live to the host store (default).
    pub fn live(self) -> Self {
        self.binding(BindingMode::Live)
    }

    /// Work on a private copy, written back at teardown.
    pub fn detached(self) -> Self {
        self.binding(BindingMode::Detached)
    }

    /// Open a view over `store`.
    pub fn open(self, store: &SessionStore) -> Result<SessionView> {
        self.open_from(store)
    }

    /// Ask `host` for its session store and open a view over it.
    pub fn open_from<H: SessionHost + ?Sized>(self, host: &H) -> Result<SessionView> {
        self.config.validate()?;
        let store = host.start().map_err(Error::from_binding)?;
        Ok(SessionView::bind(store, self.config))
    }
}
