use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::entities::{ManagerIdentity, Session};
use crate::domain::ports::{Clock, SessionStore};

pub type SessionTable = Arc<Mutex<HashMap<String, Session>>>;

// In-memory session store with a fixed TTL and sliding renewal.
//
// A single lock guards the table, so every operation is one atomic
// read-modify-write. Single-process only.
#[derive(Clone)]
pub struct InMemorySessionStore<C> {
    sessions: SessionTable,
    clock: C,
    ttl_millis: u64,
}

impl<C: Clock> InMemorySessionStore<C> {
    pub fn new(clock: C, ttl: Duration) -> Self {
        Self::with_table(Arc::new(Mutex::new(HashMap::new())), clock, ttl)
    }

    pub fn with_table(sessions: SessionTable, clock: C, ttl: Duration) -> Self {
        Self {
            sessions,
            clock,
            ttl_millis: ttl.as_millis().min(u64::MAX as u128) as u64,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    fn expiry_from(&self, now: u64) -> u64 {
        now.saturating_add(self.ttl_millis)
    }
}

#[async_trait]
impl<C: Clock> SessionStore for InMemorySessionStore<C> {
    async fn create(&self, token: String, manager: ManagerIdentity) -> Result<Session, String> {
        let session = Session {
            manager,
            expires_at: self.expiry_from(self.clock.now_epoch_millis()),
        };
        let mut sessions = self.sessions.lock().await;
        sessions.insert(token, session.clone());
        Ok(session)
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, String> {
        let now = self.clock.now_epoch_millis();
        let mut sessions = self.sessions.lock().await;
        match sessions.get(token) {
            Some(session) if now <= session.expires_at => Ok(Some(session.clone())),
            Some(_) => {
                sessions.remove(token);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn renew(&self, token: &str) -> Result<bool, String> {
        let now = self.clock.now_epoch_millis();
        let next_expiry = self.expiry_from(now);
        let mut sessions = self.sessions.lock().await;
        let Some(session) = sessions.get_mut(token) else {
            return Ok(false);
        };
        if now > session.expires_at {
            sessions.remove(token);
            return Ok(false);
        }
        // Expiry must strictly increase even if the wall clock stepped back.
        session.expires_at = next_expiry.max(session.expires_at.saturating_add(1));
        Ok(true)
    }

    async fn delete(&self, token: &str) -> Result<bool, String> {
        let mut sessions = self.sessions.lock().await;
        Ok(sessions.remove(token).is_some())
    }

    async fn sweep(&self) -> Result<usize, String> {
        let now = self.clock.now_epoch_millis();
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.expires_at >= now);
        Ok(before - sessions.len())
    }

    async fn shutdown(&self) -> Result<(), String> {
        let mut sessions = self.sessions.lock().await;
        tracing::info!(dropped = sessions.len(), "discarding in-memory sessions");
        sessions.clear();
        Ok(())
    }
}
