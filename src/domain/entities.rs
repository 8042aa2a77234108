use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub type ManagerId = i64;
pub type RequestId = i64;

// Manager identity handed to the core once credentials have been verified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerIdentity {
    pub id: ManagerId,
    pub name: String,
    pub email: String,
}

// Directory record used by credential-verifying adapters.
#[derive(Clone, Debug)]
pub struct ManagerAccount {
    pub identity: ManagerIdentity,
    // Argon2 PHC string.
    pub password_hash: String,
}

// Authenticated manager session stored in memory, keyed by token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub manager: ManagerIdentity,
    // Absolute expiry as epoch milliseconds.
    pub expires_at: u64,
}

// Untrusted submission payload as delivered by the HTTP layer.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TimeOffRequestForm {
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub manager_id: Option<ManagerId>,
}

// Validated request ready to be stored in its initial state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTimeOffRequest {
    pub employee_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub manager_id: ManagerId,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimeOffRequest {
    pub id: RequestId,
    pub employee_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: Option<String>,
    pub manager_id: ManagerId,
    pub submitted_at: DateTime<Utc>,
    pub status: RequestStatus,
    pub decided_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Submitted,
    Approved,
    Denied,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Deny,
}

impl Decision {
    // Terminal state this decision moves a submitted request into.
    pub fn target(self) -> RequestStatus {
        match self {
            Decision::Approve => RequestStatus::Approved,
            Decision::Deny => RequestStatus::Denied,
        }
    }
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Submitted => "submitted",
            RequestStatus::Approved => "approved",
            RequestStatus::Denied => "denied",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "submitted" => Some(RequestStatus::Submitted),
            "approved" => Some(RequestStatus::Approved),
            "denied" => Some(RequestStatus::Denied),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, RequestStatus::Submitted)
    }

    // Next state for a decision; `None` once the request is terminal.
    pub fn apply(self, decision: Decision) -> Option<RequestStatus> {
        match self {
            RequestStatus::Submitted => Some(decision.target()),
            RequestStatus::Approved | RequestStatus::Denied => None,
        }
    }
}

// Result of an atomic decision attempt at the repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecisionOutcome {
    Applied(TimeOffRequest),
    NotFound,
    NotOwner,
    AlreadyDecided(RequestStatus),
}
