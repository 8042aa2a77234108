use crate::domain::entities::{NewTimeOffRequest, TimeOffRequest, TimeOffRequestForm};
use crate::domain::errors::SubmissionError;
use crate::domain::ports::{Clock, ManagerDirectory, RequestRepository};
use crate::domain::validation::validate_request;

// Public submission path. Validates untrusted input and stores the request
// in its initial state. Never consults the session gate.
pub struct SubmitRequestUseCase<C, D, R> {
    pub clock: C,
    pub directory: D,
    pub requests: R,
}

impl<C, D, R> SubmitRequestUseCase<C, D, R>
where
    C: Clock,
    D: ManagerDirectory,
    R: RequestRepository,
{
    pub async fn execute(&self, form: TimeOffRequestForm) -> Result<TimeOffRequest, SubmissionError> {
        let validated =
            validate_request(&form, self.clock.today()).map_err(SubmissionError::Invalid)?;

        let manager_id = form
            .manager_id
            .filter(|id| *id > 0)
            .ok_or(SubmissionError::UnknownManager)?;
        let manager = self
            .directory
            .find_by_id(manager_id)
            .await
            .map_err(|_| SubmissionError::StorageFailure)?
            .ok_or(SubmissionError::UnknownManager)?;

        self.requests
            .insert(NewTimeOffRequest {
                employee_name: validated.employee_name,
                start_date: validated.start_date,
                end_date: validated.end_date,
                reason: validated.reason,
                manager_id: manager.id,
                submitted_at: self.clock.now(),
            })
            .await
            .map_err(|_| SubmissionError::StorageFailure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ManagerAccount, RequestStatus};
    use crate::domain::errors::ValidationError;
    use crate::interface_adapters::memory::{InMemoryManagerDirectory, InMemoryRequestRepository};
    use crate::use_cases::test_support::{manager, test_today, ManualClock, TEST_NOW};

    fn use_case() -> SubmitRequestUseCase<ManualClock, InMemoryManagerDirectory, InMemoryRequestRepository>
    {
        SubmitRequestUseCase {
            clock: ManualClock::new(TEST_NOW),
            directory: InMemoryManagerDirectory::new(vec![ManagerAccount {
                identity: manager(1),
                password_hash: String::new(),
            }]),
            requests: InMemoryRequestRepository::new(),
        }
    }

    fn form(start: String, end: String, manager_id: Option<i64>) -> TimeOffRequestForm {
        TimeOffRequestForm {
            employee_name: "Jane".to_string(),
            start_date: Some(start),
            end_date: Some(end),
            reason: None,
            manager_id,
        }
    }

    #[tokio::test]
    async fn when_form_is_valid_then_request_is_stored_as_submitted() {
        let use_case = use_case();
        let today = test_today().to_string();

        let stored = use_case
            .execute(form(today.clone(), today, Some(1)))
            .await
            .expect("expected submission to succeed");

        assert_eq!(stored.status, RequestStatus::Submitted);
        assert_eq!(stored.manager_id, 1);
        assert_eq!(stored.submitted_at, use_case.clock.now());
        assert_eq!(stored.decided_at, None);
        let listed = use_case
            .requests
            .list_for_manager(1)
            .await
            .expect("expected list to succeed");
        assert_eq!(listed, vec![stored]);
    }

    #[tokio::test]
    async fn when_start_date_is_in_the_past_then_submission_is_rejected() {
        let use_case = use_case();
        let yesterday = (test_today() - chrono::Duration::days(1)).to_string();

        let result = use_case
            .execute(form(yesterday, test_today().to_string(), Some(1)))
            .await;

        assert_eq!(
            result,
            Err(SubmissionError::Invalid(ValidationError::StartDateInPast))
        );
        assert!(use_case
            .requests
            .list_for_manager(1)
            .await
            .expect("list")
            .is_empty());
    }

    #[tokio::test]
    async fn when_manager_is_unknown_or_missing_then_returns_unknown_manager() {
        let use_case = use_case();
        let today = test_today().to_string();

        assert_eq!(
            use_case
                .execute(form(today.clone(), today.clone(), Some(42)))
                .await,
            Err(SubmissionError::UnknownManager)
        );
        assert_eq!(
            use_case.execute(form(today.clone(), today, None)).await,
            Err(SubmissionError::UnknownManager)
        );
    }

    #[tokio::test]
    async fn when_form_is_invalid_and_manager_unknown_then_validation_error_wins() {
        let use_case = use_case();
        let mut input = form(test_today().to_string(), test_today().to_string(), Some(42));
        input.employee_name = String::new();

        let result = use_case.execute(input).await;

        assert_eq!(
            result,
            Err(SubmissionError::Invalid(
                ValidationError::EmployeeNameRequired
            ))
        );
        assert_eq!(
            result.map_err(|e| e.to_string()),
            Err("Employee name is required".to_string())
        );
    }
}
