use chrono::Utc;

use codegate_domain::pagination::CursorRequest;

use crate::domain::repository::ActivationCodeRepository;
use crate::domain::types::{CodePage, CodeStats};
use crate::error::ActivationServiceError;

// ── List ─────────────────────────────────────────────────────────────────────

pub struct ListCodesInput {
    pub is_used: Option<bool>,
    pub cursor: CursorRequest,
}

pub struct ListCodesUseCase<R>
where
    R: ActivationCodeRepository,
{
    pub codes: R,
}

impl<R> ListCodesUseCase<R>
where
    R: ActivationCodeRepository,
{
    pub async fn execute(&self, input: ListCodesInput) -> Result<CodePage, ActivationServiceError> {
        let cursor = input.cursor.validated()?;
        self.codes.page(input.is_used, &cursor).await
    }
}

// ── Stats ────────────────────────────────────────────────────────────────────

pub struct CodeStatsUseCase<R>
where
    R: ActivationCodeRepository,
{
    pub codes: R,
}

impl<R> CodeStatsUseCase<R>
where
    R: ActivationCodeRepository,
{
    pub async fn execute(&self) -> Result<CodeStats, ActivationServiceError> {
        self.codes.stats(Utc::now()).await
    }
}

// ── Delete one ───────────────────────────────────────────────────────────────

pub struct DeleteCodeUseCase<R>
where
    R: ActivationCodeRepository,
{
    pub codes: R,
}

impl<R> DeleteCodeUseCase<R>
where
    R: ActivationCodeRepository,
{
    pub async fn execute(&self, code: &str) -> Result<(), ActivationServiceError> {
        if !self.codes.delete_by_code(code).await? {
            return Err(ActivationServiceError::CodeNotFound);
        }
        tracing::info!(code, "deleted activation code");
        Ok(())
    }
}
