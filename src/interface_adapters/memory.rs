use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::entities::{
    Decision, DecisionOutcome, ManagerAccount, ManagerId, ManagerIdentity, NewTimeOffRequest,
    RequestId, RequestStatus, TimeOffRequest,
};
use crate::domain::ports::{ManagerDirectory, RequestRepository};
use crate::interface_adapters::password::verify_password;

// Manager directory seeded from configuration.
#[derive(Clone, Default)]
pub struct InMemoryManagerDirectory {
    accounts: Arc<Vec<ManagerAccount>>,
}

impl InMemoryManagerDirectory {
    pub fn new(accounts: Vec<ManagerAccount>) -> Self {
        Self {
            accounts: Arc::new(accounts),
        }
    }
}

#[async_trait]
impl ManagerDirectory for InMemoryManagerDirectory {
    async fn find_by_id(&self, id: ManagerId) -> Result<Option<ManagerIdentity>, String> {
        Ok(self
            .accounts
            .iter()
            .find(|account| account.identity.id == id)
            .map(|account| account.identity.clone()))
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<ManagerIdentity>, String> {
        let account = self
            .accounts
            .iter()
            .find(|account| account.identity.email.eq_ignore_ascii_case(email));
        Ok(account
            .filter(|account| verify_password(password, &account.password_hash))
            .map(|account| account.identity.clone()))
    }
}

#[derive(Default)]
struct RequestTable {
    next_id: RequestId,
    rows: HashMap<RequestId, TimeOffRequest>,
}

// Request repository kept in process memory.
#[derive(Clone, Default)]
pub struct InMemoryRequestRepository {
    table: Arc<Mutex<RequestTable>>,
}

impl InMemoryRequestRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RequestRepository for InMemoryRequestRepository {
    async fn insert(&self, request: NewTimeOffRequest) -> Result<TimeOffRequest, String> {
        let mut table = self.table.lock().await;
        table.next_id += 1;
        let stored = TimeOffRequest {
            id: table.next_id,
            employee_name: request.employee_name,
            start_date: request.start_date,
            end_date: request.end_date,
            reason: request.reason,
            manager_id: request.manager_id,
            submitted_at: request.submitted_at,
            status: RequestStatus::Submitted,
            decided_at: None,
        };
        table.rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list_for_manager(&self, manager_id: ManagerId) -> Result<Vec<TimeOffRequest>, String> {
        let table = self.table.lock().await;
        let mut requests: Vec<TimeOffRequest> = table
            .rows
            .values()
            .filter(|request| request.manager_id == manager_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at).then(b.id.cmp(&a.id)));
        Ok(requests)
    }

    async fn decide(
        &self,
        id: RequestId,
        manager_id: ManagerId,
        decision: Decision,
        decided_at: DateTime<Utc>,
    ) -> Result<DecisionOutcome, String> {
        let mut table = self.table.lock().await;
        let Some(request) = table.rows.get_mut(&id) else {
            return Ok(DecisionOutcome::NotFound);
        };
        if request.manager_id != manager_id {
            return Ok(DecisionOutcome::NotOwner);
        }
        match request.status.apply(decision) {
            Some(next) => {
                request.status = next;
                request.decided_at = Some(decided_at);
                Ok(DecisionOutcome::Applied(request.clone()))
            }
            None => Ok(DecisionOutcome::AlreadyDecided(request.status)),
        }
    }
}
