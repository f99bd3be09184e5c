//! In-memory registry of isolated sessions.
//!
//! Used by the HTTP API, where each client creates its own session. Sessions
//! live only as long as the process, and are evicted once idle for longer
//! than the configured timeout.

use super::SessionState;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

/// A live session. Clones share the same state.
#[derive(Clone)]
pub struct SessionHandle {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Held for the whole of an action, so actions on one session never overlap.
    pub state: Arc<Mutex<SessionState>>,
    last_used: Arc<std::sync::Mutex<DateTime<Utc>>>,
}

impl SessionHandle {
    /// Mark the session as used now.
    pub fn touch(&self) {
        self.touch_at(Utc::now());
    }

    fn touch_at(&self, at: DateTime<Utc>) {
        *self.last_used.lock().unwrap() = at;
    }

    pub fn last_used(&self) -> DateTime<Utc> {
        *self.last_used.lock().unwrap()
    }
}

/// Session registry keyed by id.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
    idle_timeout: Duration,
}

impl SessionStore {
    /// Create a store that evicts sessions idle for longer than `idle_timeout`.
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Start a new, empty session. Idle sessions are evicted first.
    pub fn create(&self) -> SessionHandle {
        self.evict_idle();

        let now = Utc::now();
        let handle = SessionHandle {
            id: Uuid::new_v4(),
            created_at: now,
            state: Arc::new(Mutex::new(SessionState::new())),
            last_used: Arc::new(std::sync::Mutex::new(now)),
        };
        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(handle.id, handle.clone());
        handle
    }

    /// Look up a session and mark it as used.
    pub fn get(&self, id: &Uuid) -> Option<SessionHandle> {
        let sessions = self.sessions.read().unwrap();
        let handle = sessions.get(id).cloned()?;
        handle.touch();
        Some(handle)
    }

    /// End a session, discarding its state.
    pub fn remove(&self, id: &Uuid) -> bool {
        let mut sessions = self.sessions.write().unwrap();
        sessions.remove(id).is_some()
    }

    /// Drop sessions idle for longer than the timeout. Returns how many went.
    pub fn evict_idle(&self) -> usize {
        self.evict_idle_at(Utc::now())
    }

    fn evict_idle_at(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().unwrap();
        let before = sessions.len();
        sessions.retain(|_, handle| now - handle.last_used() <= self.idle_timeout);
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!("Evicted {} idle session(s)", evicted);
        }
        evicted
    }

    pub fn len(&self) -> usize {
        let sessions = self.sessions.read().unwrap();
        sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::hours(1))
    }
}
