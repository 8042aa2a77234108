use crate::domain::entities::{ManagerId, ManagerIdentity};
use crate::domain::ports::ManagerDirectory;

// Public lookup used to validate a manager link/QR code before submission.
pub struct LookupManagerUseCase<D> {
    pub directory: D,
}

impl<D> LookupManagerUseCase<D>
where
    D: ManagerDirectory,
{
    pub async fn execute(&self, id: ManagerId) -> Result<Option<ManagerIdentity>, String> {
        if id <= 0 {
            return Ok(None);
        }
        self.directory.find_by_id(id).await
    }
}
