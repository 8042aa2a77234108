use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::entities::{
    Decision, DecisionOutcome, ManagerId, ManagerIdentity, NewTimeOffRequest, RequestId, Session,
    TimeOffRequest,
};

// Port for session storage used by auth use cases.
//
// Every method is atomic with respect to the others. Expiry instants are
// computed by the store from its own clock and TTL.
#[async_trait]
pub trait SessionStore: Send + Sync {
    // Called once during bootstrap before the store serves requests.
    async fn start(&self) -> Result<(), String> {
        Ok(())
    }

    // Inserts or overwrites the session for `token` with a fresh expiry.
    async fn create(&self, token: String, manager: ManagerIdentity) -> Result<Session, String>;

    // Returns the live session; expired entries are removed and never returned.
    async fn get(&self, token: &str) -> Result<Option<Session>, String>;

    // Slides the expiry of a live session. `false` when absent or expired.
    async fn renew(&self, token: &str) -> Result<bool, String>;

    // Idempotent removal; reports whether an entry existed.
    async fn delete(&self, token: &str) -> Result<bool, String>;

    // Removes every expired entry and reports how many were dropped.
    async fn sweep(&self) -> Result<usize, String>;

    // Called once during graceful shutdown.
    async fn shutdown(&self) -> Result<(), String> {
        Ok(())
    }
}

// Port for manager lookup and credential verification.
#[async_trait]
pub trait ManagerDirectory: Send + Sync {
    async fn find_by_id(&self, id: ManagerId) -> Result<Option<ManagerIdentity>, String>;

    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<ManagerIdentity>, String>;
}

// Port for durable time-off request storage.
#[async_trait]
pub trait RequestRepository: Send + Sync {
    async fn insert(&self, request: NewTimeOffRequest) -> Result<TimeOffRequest, String>;

    async fn list_for_manager(&self, manager_id: ManagerId) -> Result<Vec<TimeOffRequest>, String>;

    // Compare-and-set from `Submitted`; concurrent callers see exactly one `Applied`.
    async fn decide(
        &self,
        id: RequestId,
        manager_id: ManagerId,
        decision: Decision,
        decided_at: DateTime<Utc>,
    ) -> Result<DecisionOutcome, String>;

    async fn ping(&self) -> Result<(), String> {
        Ok(())
    }
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_millis(&self) -> u64;

    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.now_epoch_millis() as i64).unwrap_or_default()
    }

    // Calendar date used for "not in the past" checks.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn start(&self) -> Result<(), String> {
        (**self).start().await
    }

    async fn create(&self, token: String, manager: ManagerIdentity) -> Result<Session, String> {
        (**self).create(token, manager).await
    }

    async fn get(&self, token: &str) -> Result<Option<Session>, String> {
        (**self).get(token).await
    }

    async fn renew(&self, token: &str) -> Result<bool, String> {
        (**self).renew(token).await
    }

    async fn delete(&self, token: &str) -> Result<bool, String> {
        (**self).delete(token).await
    }

    async fn sweep(&self) -> Result<usize, String> {
        (**self).sweep().await
    }

    async fn shutdown(&self) -> Result<(), String> {
        (**self).shutdown().await
    }
}

#[async_trait]
impl<T: ManagerDirectory + ?Sized> ManagerDirectory for Arc<T> {
    async fn find_by_id(&self, id: ManagerId) -> Result<Option<ManagerIdentity>, String> {
        (**self).find_by_id(id).await
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<ManagerIdentity>, String> {
        (**self).verify_credentials(email, password).await
    }
}

#[async_trait]
impl<T: RequestRepository + ?Sized> RequestRepository for Arc<T> {
    async fn insert(&self, request: NewTimeOffRequest) -> Result<TimeOffRequest, String> {
        (**self).insert(request).await
    }

    async fn list_for_manager(&self, manager_id: ManagerId) -> Result<Vec<TimeOffRequest>, String> {
        (**self).list_for_manager(manager_id).await
    }

    async fn decide(
        &self,
        id: RequestId,
        manager_id: ManagerId,
        decision: Decision,
        decided_at: DateTime<Utc>,
    ) -> Result<DecisionOutcome, String> {
        (**self).decide(id, manager_id, decision, decided_at).await
    }

    async fn ping(&self) -> Result<(), String> {
        (**self).ping().await
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now_epoch_millis(&self) -> u64 {
        (**self).now_epoch_millis()
    }

    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}
