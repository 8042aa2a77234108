use chrono::{Local, NaiveDate};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::ports::{Clock, ManagerDirectory, RequestRepository, SessionStore};
use crate::interface_adapters::cookies::CookieSettings;

// Which persistence backend the request repository talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    InMemory,
    Postgres,
}

// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub managers: Arc<dyn ManagerDirectory>,
    pub requests: Arc<dyn RequestRepository>,
    pub clock: Arc<dyn Clock>,
    pub cookies: CookieSettings,
    pub storage: StorageBackend,
}

// System clock adapter used by the running service.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    // Employees pick dates on the server's calendar, not UTC.
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
