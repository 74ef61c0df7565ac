//! Signed-in sessions, keyed by the id carried in the session cookie.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use store::User;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "wed_user";

/// A signed-in guest.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    /// Directory user key, which is also the guest slug.
    pub user_key: String,
    pub created_at: Instant,
}

/// In-process session table. Entries older than the TTL are treated as
/// absent and dropped when touched.
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Stores a new session and returns its id.
    pub fn create(&self, user: User, user_key: impl Into<String>) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.sessions.insert(
            id.clone(),
            Session {
                user,
                user_key: user_key.into(),
                created_at: Instant::now(),
            },
        );
        id
    }

    pub fn get(&self, id: &str) -> Option<Session> {
        let session = self.sessions.get(id)?.clone();
        if session.created_at.elapsed() > self.ttl {
            self.sessions.remove(id);
            return None;
        }
        Some(session)
    }

    /// Returns whether a session was removed.
    pub fn remove(&self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Drops expired sessions; returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        let ttl = self.ttl;
        self.sessions.retain(|_, s| s.created_at.elapsed() <= ttl);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
