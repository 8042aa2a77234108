use crate::domain::entities::{Decision, DecisionOutcome, ManagerIdentity, RequestId, TimeOffRequest};
use crate::domain::errors::DecisionError;
use crate::domain::ports::{Clock, RequestRepository};

// Approve/deny use case. The caller must already hold an authenticated
// manager identity; ownership is enforced by the repository's atomic decide.
pub struct DecideRequestUseCase<C, R> {
    pub clock: C,
    pub requests: R,
}

impl<C, R> DecideRequestUseCase<C, R>
where
    C: Clock,
    R: RequestRepository,
{
    pub async fn execute(
        &self,
        manager: &ManagerIdentity,
        request_id: RequestId,
        decision: Decision,
    ) -> Result<TimeOffRequest, DecisionError> {
        let outcome = self
            .requests
            .decide(request_id, manager.id, decision, self.clock.now())
            .await
            .map_err(|_| DecisionError::StorageFailure)?;

        match outcome {
            DecisionOutcome::Applied(request) => {
                tracing::info!(
                    request_id,
                    manager_id = manager.id,
                    status = request.status.as_str(),
                    "request decided"
                );
                Ok(request)
            }
            DecisionOutcome::NotFound => Err(DecisionError::NotFound),
            DecisionOutcome::NotOwner => Err(DecisionError::Forbidden),
            DecisionOutcome::AlreadyDecided(status) => Err(DecisionError::AlreadyDecided(status)),
        }
    }
}
