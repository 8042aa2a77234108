use crate::domain::entities::{ManagerIdentity, TimeOffRequest};
use crate::domain::ports::RequestRepository;

// Requests addressed to the authenticated manager, newest first.
pub struct ListRequestsUseCase<R> {
    pub requests: R,
}

impl<R> ListRequestsUseCase<R>
where
    R: RequestRepository,
{
    pub async fn execute(&self, manager: &ManagerIdentity) -> Result<Vec<TimeOffRequest>, String> {
        self.requests.list_for_manager(manager.id).await
    }
}
