use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::entities::{
    Decision, DecisionOutcome, ManagerAccount, ManagerId, ManagerIdentity, NewTimeOffRequest, RequestId,
    RequestStatus, TimeOffRequest,
};
use crate::domain::ports::{ManagerDirectory, RequestRepository};
use crate::interface_adapters::password::verify_password;

const REQUEST_COLUMNS: &str = "id, employee_name, start_date, end_date, reason, manager_id, \
                               status, submitted_at, decided_at";

// PostgreSQL-backed manager directory.
#[derive(Clone)]
pub struct PostgresManagerDirectory {
    pub db: PgPool,
}

impl PostgresManagerDirectory {
    // Upsert a configured manager account, keyed by id.
    pub async fn upsert_account(&self, account: &ManagerAccount) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO managers (id, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                email = EXCLUDED.email,
                password_hash = EXCLUDED.password_hash
            "#,
        )
        .bind(account.identity.id)
        .bind(&account.identity.name)
        .bind(&account.identity.email)
        .bind(&account.password_hash)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ManagerDirectory for PostgresManagerDirectory {
    async fn find_by_id(&self, id: ManagerId) -> Result<Option<ManagerIdentity>, String> {
        let row = sqlx::query("SELECT id, name, email FROM managers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| e.to_string())?;

        row.as_ref().map(map_manager_row).transpose()
    }

    async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<ManagerIdentity>, String> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash FROM managers WHERE lower(email) = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| e.to_string())?;

        let Some(row) = row else {
            return Ok(None);
        };
        let password_hash: String = row.try_get("password_hash").map_err(|e| e.to_string())?;
        if !verify_password(password, &password_hash) {
            return Ok(None);
        }
        map_manager_row(&row).map(Some)
    }
}

// PostgreSQL-backed request repository.
#[derive(Clone)]
pub struct PostgresRequestRepository {
    pub db: PgPool,
}

#[async_trait]
impl RequestRepository for PostgresRequestRepository {
    async fn insert(&self, request: NewTimeOffRequest) -> Result<TimeOffRequest, String> {
        let sql = format!(
            r#"
            INSERT INTO time_off_requests
                (employee_name, start_date, end_date, reason, manager_id, status, submitted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {REQUEST_COLUMNS}
            "#
        );
        let row = sqlx::query(&sql)
            .bind(&request.employee_name)
            .bind(request.start_date)
            .bind(request.end_date)
            .bind(&request.reason)
            .bind(request.manager_id)
            .bind(RequestStatus::Submitted.as_str())
            .bind(request.submitted_at)
            .fetch_one(&self.db)
            .await
            .map_err(|e| e.to_string())?;

        map_request_row(&row)
    }

    async fn list_for_manager(&self, manager_id: ManagerId) -> Result<Vec<TimeOffRequest>, String> {
        let sql = format!(
            "SELECT {REQUEST_COLUMNS} FROM time_off_requests \
             WHERE manager_id = $1 ORDER BY submitted_at DESC, id DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(manager_id)
            .fetch_all(&self.db)
            .await
            .map_err(|e| e.to_string())?;

        rows.iter().map(map_request_row).collect()
    }

    async fn decide(
        &self,
        id: RequestId,
        manager_id: ManagerId,
        decision: Decision,
        decided_at: DateTime<Utc>,
    ) -> Result<DecisionOutcome, String> {
        let next = decision.target();

        // The status guard makes the update a compare-and-set: a concurrent
        // decision re-evaluates the predicate after the first commits.
        let sql = format!(
            r#"
            UPDATE time_off_requests
            SET status = $1, decided_at = $2
            WHERE id = $3 AND manager_id = $4 AND status = $5
            RETURNING {REQUEST_COLUMNS}
            "#
        );
        let updated = sqlx::query(&sql)
            .bind(next.as_str())
            .bind(decided_at)
            .bind(id)
            .bind(manager_id)
            .bind(RequestStatus::Submitted.as_str())
            .fetch_optional(&self.db)
            .await
            .map_err(|e| e.to_string())?;

        if let Some(row) = updated {
            return map_request_row(&row).map(DecisionOutcome::Applied);
        }

        let current = sqlx::query("SELECT manager_id, status FROM time_off_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| e.to_string())?;

        let Some(row) = current else {
            return Ok(DecisionOutcome::NotFound);
        };
        let owner: ManagerId = row.try_get("manager_id").map_err(|e| e.to_string())?;
        if owner != manager_id {
            return Ok(DecisionOutcome::NotOwner);
        }
        let status: String = row.try_get("status").map_err(|e| e.to_string())?;
        Ok(DecisionOutcome::AlreadyDecided(parse_status(&status)?))
    }

    async fn ping(&self) -> Result<(), String> {
        sqlx::query("SELECT 1")
            .execute(&self.db)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

fn map_manager_row(row: &PgRow) -> Result<ManagerIdentity, String> {
    Ok(ManagerIdentity {
        id: row.try_get("id").map_err(|e| e.to_string())?,
        name: row.try_get("name").map_err(|e| e.to_string())?,
        email: row.try_get("email").map_err(|e| e.to_string())?,
    })
}

fn map_request_row(row: &PgRow) -> Result<TimeOffRequest, String> {
    let status: String = row.try_get("status").map_err(|e| e.to_string())?;
    Ok(TimeOffRequest {
        id: row.try_get("id").map_err(|e| e.to_string())?,
        employee_name: row.try_get("employee_name").map_err(|e| e.to_string())?,
        start_date: row.try_get("start_date").map_err(|e| e.to_string())?,
        end_date: row.try_get("end_date").map_err(|e| e.to_string())?,
        reason: row.try_get("reason").map_err(|e| e.to_string())?,
        manager_id: row.try_get("manager_id").map_err(|e| e.to_string())?,
        submitted_at: row.try_get("submitted_at").map_err(|e| e.to_string())?,
        status: parse_status(&status)?,
        decided_at: row.try_get("decided_at").map_err(|e| e.to_string())?,
    })
}

fn parse_status(value: &str) -> Result<RequestStatus, String> {
    RequestStatus::parse(value).ok_or_else(|| format!("unknown request status {value:?}"))
}
