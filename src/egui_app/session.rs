//! Session persistence and the process-wide session context
//!
//! `SessionStore` owns the on-disk record (token + user id). `SessionContext`
//! is the single source of truth for "who is logged in": screens read it on
//! mount, and anything that caches credentials subscribes to its changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Credentials of the logged-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    #[serde(default)]
    pub handle: Option<String>,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// File-backed storage for the session record
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when nothing has been stored
    pub fn load(&self) -> Result<Option<Session>, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Notification sent to subscribers on every transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    LoggedIn(Session),
    LoggedOut,
}

struct Inner {
    current: Option<Session>,
    subscribers: Vec<Sender<SessionChange>>,
}

/// Shared handle to the current session; clones see the same state
#[derive(Clone)]
pub struct SessionContext {
    store: SessionStore,
    inner: Arc<Mutex<Inner>>,
}

impl SessionContext {
    /// Restore whatever the store holds. A corrupt record is discarded and
    /// the user starts anonymous.
    pub fn restore(store: SessionStore) -> Self {
        let current = match store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Discarding unreadable session at {}: {}", store.path().display(), e);
                let _ = store.clear();
                None
            }
        };
        if let Some(ref s) = current {
            tracing::info!("Restored session for user {}", s.user_id);
        }
        Self {
            store,
            inner: Arc::new(Mutex::new(Inner {
                current,
                subscribers: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave `Inner` half-updated.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn current(&self) -> Option<Session> {
        self.lock().current.clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.lock().current.is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.lock().current.as_ref().map(|s| s.token.clone())
    }

    pub fn subscribe(&self) -> Receiver<SessionChange> {
        let (tx, rx) = channel();
        self.lock().subscribers.push(tx);
        rx
    }

    /// Persist and publish a new session
    pub fn login(&self, session: Session) -> Result<(), SessionError> {
        self.store.save(&session)?;
        tracing::info!("Logged in as user {}", session.user_id);
        let mut inner = self.lock();
        inner.current = Some(session.clone());
        notify(&mut inner.subscribers, SessionChange::LoggedIn(session));
        Ok(())
    }

    /// Forget the session in memory and on disk
    pub fn logout(&self) -> Result<(), SessionError> {
        let mut inner = self.lock();
        inner.current = None;
        notify(&mut inner.subscribers, SessionChange::LoggedOut);
        drop(inner);
        tracing::info!("Logged out");
        self.store.clear()
    }
}

fn notify(subscribers: &mut Vec<Sender<SessionChange>>, change: SessionChange) {
    subscribers.retain(|tx| tx.send(change.clone()).is_ok());
}
