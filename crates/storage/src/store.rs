//! Host-owned session store handle
//!
//! A [`SessionStore`] is the associative array the host keeps for one
//! session. It is a cheaply cloneable handle: every clone observes the same
//! entries, so the host and any view bound to it share state without either
//! reaching for a global.
//!
//! # Thread Safety
//!
//! Entries sit behind a `parking_lot::RwLock`. Each call takes the lock for
//! its own duration only; sequences of calls are not atomic with respect to
//! other handles.

use crate::data::SessionData;
use crate::error::{StoreError, StoreResult};
use parking_lot::RwLock;
use sessionview_core::Value;
use std::sync::Arc;

#[derive(Debug)]
struct Inner {
    data: SessionData,
    active: bool,
}

/// Shared handle to a host session store.
///
/// # Example
///
/// ```
/// use sessionview_storage::SessionStore;
///
/// let store = SessionStore::new();
/// let handle = store.clone();
/// handle.insert("user", "alice");
/// assert!(store.contains_key("user"));
/// ```
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<Inner>>,
}

impl SessionStore {
    /// Create an empty, active store
    pub fn new() -> Self {
        Self::from_data(SessionData::new())
    }

    /// Create an active store holding `data`
    pub fn from_data(data: SessionData) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner { data, active: true })),
        }
    }

    /// Create an active store from key/value pairs, in order
    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::from_data(entries.into_iter().collect())
    }

    /// Create an independent store holding a copy of this one's entries.
    ///
    /// The copy starts active regardless of this store's state.
    pub fn fork(&self) -> Self {
        Self::from_data(self.snapshot())
    }

    /// Check whether two handles refer to the same store
    pub fn ptr_eq(&self, other: &SessionStore) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Whether the host still considers this session open
    pub fn is_active(&self) -> bool {
        self.inner.read().active
    }

    /// Mark the session as ended.
    ///
    /// Entries stay readable; new bindings and write-backs are refused.
    pub fn close(&self) {
        let mut inner = self.inner.write();
        if inner.active {
            inner.active = false;
            tracing::debug!(entries = inner.data.len(), "session store closed");
        }
    }

    /// Return `Err(StoreError::Closed)` unless the store is active
    pub fn ensure_active(&self) -> StoreResult<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(StoreError::Closed)
        }
    }

    // ========================================================================
    // Scoped access
    // ========================================================================

    /// Run `f` with shared access to the entries
    pub fn read<R>(&self, f: impl FnOnce(&SessionData) -> R) -> R {
        f(&self.inner.read().data)
    }

    /// Run `f` with exclusive access to the entries
    pub fn write<R>(&self, f: impl FnOnce(&mut SessionData) -> R) -> R {
        f(&mut self.inner.write().data)
    }

    /// Copy of all entries, internal keys included
    pub fn snapshot(&self) -> SessionData {
        self.read(SessionData::clone)
    }

    /// Replace all entries with `data`.
    ///
    /// Fails with [`StoreError::Closed`] if the host closed the session.
    pub fn replace(&self, data: SessionData) -> StoreResult<()> {
        let mut inner = self.inner.write();
        if !inner.active {
            return Err(StoreError::Closed);
        }
        inner.data = data;
        Ok(())
    }

    // ========================================================================
    // Host-side convenience accessors
    // ========================================================================

    /// Get a copy of the value at `key`
    pub fn get(&self, key: &str) -> Option<Value> {
        self.read(|data| data.get(key).cloned())
    }

    /// Check if `key` is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.read(|data| data.contains_key(key))
    }

    /// Insert a value, returning the previous one
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.write(|data| data.insert(key, value))
    }

    /// Remove a key, returning its value if it existed
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.write(|data| data.remove(key))
    }

    /// Number of entries, internal keys included
    pub fn len(&self) -> usize {
        self.read(SessionData::len)
    }

    /// Check if the store has no entries
    pub fn is_empty(&self) -> bool {
        self.read(SessionData::is_empty)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
