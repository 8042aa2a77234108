use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::entities::{ManagerId, ManagerIdentity, NewTimeOffRequest, Session};
use crate::domain::ports::{Clock, SessionStore};

pub(crate) type SessionTable = Arc<Mutex<HashMap<String, Session>>>;

// Epoch millis for 2025-09-15T09:00:00Z.
pub(crate) const TEST_NOW: u64 = 1_757_926_800_000;

// Shared time source for deterministic tests; clones observe the same instant.
#[derive(Clone)]
pub(crate) struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub(crate) fn new(now: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(now)),
        }
    }

    pub(crate) fn advance(&self, millis: u64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }

    pub(crate) fn set(&self, now: u64) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_epoch_millis(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

pub(crate) fn manager(id: ManagerId) -> ManagerIdentity {
    ManagerIdentity {
        id,
        name: format!("Manager {id}"),
        email: format!("manager{id}@example.com"),
    }
}

pub(crate) fn test_today() -> NaiveDate {
    ManualClock::new(TEST_NOW).today()
}

// Valid request for `manager_id`, submitted `offset_secs` after the test epoch.
pub(crate) fn new_request(manager_id: ManagerId, offset_secs: i64) -> NewTimeOffRequest {
    let submitted_at = DateTime::<Utc>::from_timestamp_millis(TEST_NOW as i64)
        .expect("valid timestamp")
        + chrono::Duration::seconds(offset_secs);
    NewTimeOffRequest {
        employee_name: "Jane Doe".to_string(),
        start_date: test_today(),
        end_date: test_today() + chrono::Duration::days(2),
        reason: Some("Family trip".to_string()),
        manager_id,
        submitted_at,
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub create: bool,
    pub get: bool,
    pub renew: bool,
    pub delete: bool,
    pub sweep: bool,
}

// Session store fake with failure injection and call counters.
#[derive(Clone)]
pub(crate) struct RecordingStore {
    sessions: SessionTable,
    failures: FailureFlags,
    renewals: Arc<AtomicUsize>,
    sweeps: Arc<AtomicUsize>,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            failures: FailureFlags::default(),
            renewals: Arc::new(AtomicUsize::new(0)),
            sweeps: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn insert_test_session(&self, token: impl Into<String>, session: Session) {
        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard.insert(token.into(), session);
    }

    pub(crate) fn get_test_session(&self, token: &str) -> Option<Session> {
        let guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard.get(token).cloned()
    }

    pub(crate) fn renewals(&self) -> usize {
        self.renewals.load(Ordering::SeqCst)
    }

    pub(crate) fn sweeps(&self) -> usize {
        self.sweeps.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for RecordingStore {
    async fn create(&self, token: String, manager: ManagerIdentity) -> Result<Session, String> {
        if self.failures.create {
            return Err("create failed".to_string());
        }

        let session = Session {
            manager,
            expires_at: u64::MAX,
        };
        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard.insert(token, session.clone());
        Ok(session)
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, String> {
        if self.failures.get {
            return Err("get failed".to_string());
        }

        let guard = self.sessions.lock().expect("sessions mutex poisoned");
        Ok(guard.get(token).cloned())
    }

    async fn renew(&self, token: &str) -> Result<bool, String> {
        self.renewals.fetch_add(1, Ordering::SeqCst);
        if self.failures.renew {
            return Err("renew failed".to_string());
        }

        let guard = self.sessions.lock().expect("sessions mutex poisoned");
        Ok(guard.contains_key(token))
    }

    async fn delete(&self, token: &str) -> Result<bool, String> {
        if self.failures.delete {
            return Err("delete failed".to_string());
        }

        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        Ok(guard.remove(token).is_some())
    }

    async fn sweep(&self) -> Result<usize, String> {
        self.sweeps.fetch_add(1, Ordering::SeqCst);
        if self.failures.sweep {
            return Err("sweep failed".to_string());
        }
        Ok(0)
    }
}
