//! Session registry keyed by session id.
//!
//! Replaces a single process-wide game with one controller per player.
//! Entries are created on `open`, refreshed on every `resume`, and removed
//! by `close` or once they sit idle longer than the configured TTL.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use tracing::info;
use uuid::Uuid;

use crate::data::QuestionDeck;
use crate::error::SessionError;

use super::controller::{SessionController, ShufflePolicy};

/// Default idle lifetime of a session.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

struct SessionEntry {
    controller: Arc<SessionController>,
    owner: Option<String>,
    last_seen: Instant,
}

pub struct SessionRegistry {
    deck: Arc<QuestionDeck>,
    policy: ShufflePolicy,
    ttl: Duration,
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
}

impl SessionRegistry {
    pub fn new(deck: Arc<QuestionDeck>, policy: ShufflePolicy, ttl: Duration) -> Self {
        Self {
            deck,
            policy,
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn deck(&self) -> &QuestionDeck {
        &self.deck
    }

    /// Create a session with a fresh id.
    pub fn open(&self, owner: Option<String>) -> (Uuid, Arc<SessionController>) {
        let id = Uuid::new_v4();
        let controller = Arc::new(SessionController::new(Arc::clone(&self.deck), self.policy));

        let mut sessions = self.lock();
        sessions.insert(
            id,
            SessionEntry {
                controller: Arc::clone(&controller),
                owner: owner.clone(),
                last_seen: Instant::now(),
            },
        );
        info!(session = %id, owner = owner.as_deref().unwrap_or("anonymous"), active = sessions.len(), "session opened");

        (id, controller)
    }

    /// Look up a live session and mark it as used.
    pub fn resume(&self, id: Uuid) -> Result<Arc<SessionController>, SessionError> {
        self.resume_at(id, Instant::now())
    }

    fn resume_at(&self, id: Uuid, now: Instant) -> Result<Arc<SessionController>, SessionError> {
        let mut sessions = self.lock();
        let entry = sessions
            .get_mut(&id)
            .ok_or(SessionError::SessionNotFound(id))?;
        entry.last_seen = now;
        Ok(Arc::clone(&entry.controller))
    }

    pub fn owner(&self, id: Uuid) -> Option<String> {
        self.lock().get(&id).and_then(|e| e.owner.clone())
    }

    /// Drop a session explicitly. Returns whether it existed.
    pub fn close(&self, id: Uuid) -> bool {
        let removed = self.lock().remove(&id).is_some();
        if removed {
            info!(session = %id, "session closed");
        }
        removed
    }

    /// Remove sessions idle for longer than the TTL as of `now`.
    pub fn evict_idle(&self, now: Instant) -> usize {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|id, entry| {
            let keep = now.saturating_duration_since(entry.last_seen) <= self.ttl;
            if !keep {
                info!(session = %id, "session expired");
            }
            keep
        });
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, SessionEntry>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
