use chrono::{DateTime, Utc};

use crate::domain::repository::ActivationCodeRepository;
use crate::domain::types::ValidationOutcome;
use crate::error::ActivationServiceError;

pub struct ValidateCodeUseCase<R>
where
    R: ActivationCodeRepository,
{
    pub codes: R,
}

impl<R> ValidateCodeUseCase<R>
where
    R: ActivationCodeRepository,
{
    pub async fn execute(&self, code: &str) -> Result<ValidationOutcome, ActivationServiceError> {
        self.execute_at(code, Utc::now()).await
    }

    /// Validate `code` as of `now`.
    ///
    /// Blank input is rejected without touching storage. Any other input is looked up
    /// verbatim, surrounding whitespace included. The counter bump
    /// and any state transition are applied under the record's lock and persisted
    /// together before the outcome is returned.
    pub async fn execute_at(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<ValidationOutcome, ActivationServiceError> {
        // Whitespace only decides blankness; the lookup itself is an exact match.
        if code.trim().is_empty() {
            return Ok(ValidationOutcome::Rejected);
        }

        let outcome = self
            .codes
            .update_by_code(code, |record| record.record_validation(now))
            .await?
            .unwrap_or(ValidationOutcome::NotFound);

        match outcome {
            ValidationOutcome::Activated { expires_at, .. } => {
                tracing::info!(code, %expires_at, "activation code activated");
            }
            ValidationOutcome::Invalidated { validation_count } => {
                tracing::warn!(code, validation_count, "activation code over validation limit");
            }
            ValidationOutcome::NotFound => {
                tracing::warn!(code, "activation code not found");
            }
            ValidationOutcome::Expired { .. } => {
                tracing::info!(code, "activation code expired");
            }
            _ => {}
        }
        Ok(outcome)
    }
}
