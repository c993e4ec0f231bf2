use chrono::{DateTime, Utc};

use crate::domain::repository::ActivationCodeRepository;
use crate::domain::types::NewActivationCode;
use crate::error::ActivationServiceError;

/// Codes inserted into an empty table when demo seeding is enabled.
pub const DEMO_CODES: [&str; 5] = [
    "TEST-CODE-001",
    "TEST-CODE-002",
    "TEST-CODE-003",
    "DEMO-CODE-123",
    "DEMO-CODE-456",
];

pub struct SeedDemoCodesUseCase<R>
where
    R: ActivationCodeRepository,
{
    pub codes: R,
}

impl<R> SeedDemoCodesUseCase<R>
where
    R: ActivationCodeRepository,
{
    /// Insert [`DEMO_CODES`] unless the table already holds any code.
    /// Returns the number of codes inserted.
    pub async fn execute(&self, now: DateTime<Utc>) -> Result<usize, ActivationServiceError> {
        if self.codes.count().await? > 0 {
            return Ok(0);
        }
        let rows: Vec<_> = DEMO_CODES
            .iter()
            .map(|code| NewActivationCode {
                code: (*code).to_owned(),
                created_at: now,
            })
            .collect();
        self.codes.insert_many(&rows).await?;
        Ok(rows.len())
    }
}
