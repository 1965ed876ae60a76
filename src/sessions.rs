//! In-memory store of isolated instances (rosters, matches) keyed by id.
//!
//! Every access takes the write lock, so operations on the store are
//! serialized. Each entry remembers when it was last touched so idle ones can
//! be dropped.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Errors from store access.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionError {
    /// No entry with this id (never created or already expired).
    NotFound,
    /// A previous holder of the lock panicked.
    LockPoisoned,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::NotFound => write!(f, "Not found"),
            SessionError::LockPoisoned => write!(f, "lock error"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Stored value + last activity time.
struct Entry<T> {
    value: T,
    last_activity: Instant,
}

pub struct SessionStore<T> {
    entries: RwLock<HashMap<Uuid, Entry<T>>>,
}

impl<T> Default for SessionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SessionStore<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Insert (or replace) a value under `id`.
    pub fn insert(&self, id: Uuid, value: T) -> Result<(), SessionError> {
        let mut g = self.entries.write().map_err(|_| SessionError::LockPoisoned)?;
        g.insert(
            id,
            Entry {
                value,
                last_activity: Instant::now(),
            },
        );
        Ok(())
    }

    /// Run `f` against the entry, refreshing its activity time.
    pub fn with_mut<R>(&self, id: Uuid, f: impl FnOnce(&mut T) -> R) -> Result<R, SessionError> {
        let mut g = self.entries.write().map_err(|_| SessionError::LockPoisoned)?;
        let entry = g.get_mut(&id).ok_or(SessionError::NotFound)?;
        entry.last_activity = Instant::now();
        Ok(f(&mut entry.value))
    }

    pub fn contains(&self, id: Uuid) -> Result<bool, SessionError> {
        let g = self.entries.read().map_err(|_| SessionError::LockPoisoned)?;
        Ok(g.contains_key(&id))
    }

    pub fn len(&self) -> Result<usize, SessionError> {
        let g = self.entries.read().map_err(|_| SessionError::LockPoisoned)?;
        Ok(g.len())
    }

    pub fn is_empty(&self) -> Result<bool, SessionError> {
        Ok(self.len()? == 0)
    }

    /// Drop entries idle for at least `timeout`. Returns how many were removed.
    pub fn remove_idle(&self, timeout: Duration) -> Result<usize, SessionError> {
        let mut g = self.entries.write().map_err(|_| SessionError::LockPoisoned)?;
        let before = g.len();
        g.retain(|_, entry| entry.last_activity.elapsed() < timeout);
        Ok(before - g.len())
    }
}
