//! Host collaborator contract
//!
//! The host environment owns the session lifecycle: it starts a session,
//! hands out the store for the current request, and persists it afterwards.
//! Views only ask the host for a store through [`SessionHost::start`].

use crate::error::{StoreError, StoreResult};
use crate::store::SessionStore;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// A source of session stores.
pub trait SessionHost {
    /// Start (or resume) the session and return its store.
    fn start(&self) -> StoreResult<SessionStore>;
}

/// A store is its own host as long as it is active.
impl SessionHost for SessionStore {
    fn start(&self) -> StoreResult<SessionStore> {
        self.ensure_active()?;
        Ok(self.clone())
    }
}

/// In-process host keeping one session at a time.
///
/// `start` resumes the current session if one is active and opens a fresh,
/// empty one otherwise. After [`InMemoryHost::shutdown`] every `start` fails.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    current: Mutex<Option<SessionStore>>,
    shut_down: AtomicBool,
}

impl InMemoryHost {
    /// Create a host with no session yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host resuming an existing store
    pub fn with_store(store: SessionStore) -> Self {
        Self {
            current: Mutex::new(Some(store)),
            shut_down: AtomicBool::new(false),
        }
    }

    /// The current session store, if one was started
    pub fn current(&self) -> Option<SessionStore> {
        self.current.lock().clone()
    }

    /// End the current session; the next `start` opens a new one
    pub fn end_session(&self) {
        if let Some(store) = self.current.lock().take() {
            store.close();
        }
    }

    /// Stop handing out sessions and close the current one
    pub fn shutdown(&self) {
        self.shut_down.store(true, Ordering::SeqCst);
        self.end_session();
    }
}

impl SessionHost for InMemoryHost {
    fn start(&self) -> StoreResult<SessionStore> {
        if self.shut_down.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("host has been shut down".to_string()));
        }
        let mut current = self.current.lock();
        if let Some(store) = current.as_ref().filter(|s| s.is_active()) {
            return Ok(store.clone());
        }
        let store = SessionStore::new();
        tracing::debug!("starting new session");
        *current = Some(store.clone());
        Ok(store)
    }
}
