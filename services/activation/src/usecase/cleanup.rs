use chrono::{DateTime, Utc};

use crate::domain::repository::ActivationCodeRepository;
use crate::error::ActivationServiceError;

/// Remove used codes whose activation window has closed.
///
/// Shared by `DELETE /api/admin/codes/expired` and the expiry sweeper. Idempotent:
/// a second run at the same instant deletes nothing.
pub struct DeleteExpiredUseCase<R>
where
    R: ActivationCodeRepository,
{
    pub codes: R,
}

impl<R> DeleteExpiredUseCase<R>
where
    R: ActivationCodeRepository,
{
    pub async fn execute(&self) -> Result<u64, ActivationServiceError> {
        self.execute_at(Utc::now()).await
    }

    pub async fn execute_at(&self, now: DateTime<Utc>) -> Result<u64, ActivationServiceError> {
        self.codes.delete_expired(now).await
    }
}
