//! Per-user session store
//!
//! Sessions live in memory only. A session is created by the first event from
//! a user and evicted when its conversation reaches a terminal state.

use crate::conversation::Session;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory sessions keyed by platform user id.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<i64, Session>>,
}

impl SessionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the user's session, if one exists
    pub async fn get(&self, user_id: i64) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions.get(&user_id).cloned()
    }

    /// Insert or replace the user's session
    pub async fn save(&self, user_id: i64, session: Session) {
        let mut sessions = self.sessions.write().await;
        if sessions.insert(user_id, session).is_none() {
            debug!(user_id, "Session created");
        }
    }

    /// Remove the user's session, returning it if present
    pub async fn evict(&self, user_id: i64) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&user_id)
    }

    /// Check if the user has a session
    pub async fn contains(&self, user_id: i64) -> bool {
        let sessions = self.sessions.read().await;
        sessions.contains_key(&user_id)
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// True when no session is live
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
