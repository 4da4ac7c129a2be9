//! Process-wide session store.
//!
//! Maps session keys to their histories. Entries are created lazily on
//! first reference and live until the process exits. Each session sits
//! behind its own async mutex, so read-modify-write sequences on one key
//! are serialized while different keys proceed independently.

use crate::message::{Message, MessageRole};
use crate::session::{RETENTION_CAP, Session};
use langbuddy_core::SessionKey;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Exclusive access to one session.
pub type SessionGuard = OwnedMutexGuard<Session>;

/// Session histories keyed by [`SessionKey`].
#[derive(Debug)]
pub struct SessionStore {
    capacity: usize,
    sessions: Mutex<HashMap<SessionKey, Arc<AsyncMutex<Session>>>>,
}

impl SessionStore {
    /// Creates an empty store with the default retention cap.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(RETENTION_CAP)
    }

    /// Creates an empty store whose sessions retain at most `capacity` messages.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the per-session retention cap.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn entry(&self, key: &SessionKey) -> Arc<AsyncMutex<Session>> {
        // The map lock is held only for the lookup, never across an await.
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        sessions
            .entry(key.clone())
            .or_insert_with(|| {
                Arc::new(AsyncMutex::new(Session::with_capacity(
                    key.clone(),
                    self.capacity,
                )))
            })
            .clone()
    }

    /// Locks the session for `key`, creating it if needed.
    ///
    /// The guard gives exclusive access until dropped; other callers for the
    /// same key wait.
    pub async fn lock(&self, key: &SessionKey) -> SessionGuard {
        self.entry(key).lock_owned().await
    }

    /// Returns the current history for `key`, creating an empty session if
    /// none exists.
    pub async fn get_or_create(&self, key: &SessionKey) -> Vec<Message> {
        self.lock(key).await.snapshot()
    }

    /// Appends a message to the session for `key`, evicting the oldest
    /// message once the retention cap is exceeded.
    pub async fn append(&self, key: &SessionKey, role: MessageRole, content: impl Into<String>) {
        self.lock(key).await.push(Message::new(role, content));
    }

    /// Replaces the history for `key` with an empty one.
    pub async fn reset(&self, key: &SessionKey) {
        self.lock(key).await.clear();
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
