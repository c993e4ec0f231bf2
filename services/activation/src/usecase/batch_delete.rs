use regex::Regex;

use crate::domain::repository::ActivationCodeRepository;
use crate::error::ActivationServiceError;

pub struct BatchDeleteInput {
    pub pattern: String,
    pub dry_run: bool,
}

#[derive(Debug)]
pub struct BatchDeleteResult {
    pub matched_codes: Vec<String>,
    pub deleted_count: u64,
    pub dry_run: bool,
}

impl BatchDeleteResult {
    pub fn matched_count(&self) -> usize {
        self.matched_codes.len()
    }
}

pub struct BatchDeleteUseCase<R>
where
    R: ActivationCodeRepository,
{
    pub codes: R,
}

impl<R> BatchDeleteUseCase<R>
where
    R: ActivationCodeRepository,
{
    /// Delete every code matching `pattern` (unanchored regex search).
    ///
    /// Scans the whole table in memory.
    pub async fn execute(
        &self,
        input: BatchDeleteInput,
    ) -> Result<BatchDeleteResult, ActivationServiceError> {
        // 1. Reject bad patterns before reading storage
        if input.pattern.trim().is_empty() {
            return Err(ActivationServiceError::PatternRequired);
        }
        let regex = Regex::new(&input.pattern)
            .map_err(|e| ActivationServiceError::InvalidPattern(e.to_string()))?;

        // 2. Match against every stored code
        let matched: Vec<_> = self
            .codes
            .list_all()
            .await?
            .into_iter()
            .filter(|c| regex.is_match(&c.code))
            .collect();
        let matched_codes = matched.iter().map(|c| c.code.clone()).collect();

        if input.dry_run {
            tracing::info!(pattern = %input.pattern, matched = matched.len(), "batch delete dry run");
            return Ok(BatchDeleteResult {
                matched_codes,
                deleted_count: 0,
                dry_run: true,
            });
        }

        // 3. Delete the matched ids in one transaction
        let ids: Vec<_> = matched.iter().map(|c| c.id).collect();
        let deleted_count = self.codes.delete_by_ids(&ids).await?;
        tracing::info!(pattern = %input.pattern, deleted = deleted_count, "batch deleted codes");
        Ok(BatchDeleteResult {
            matched_codes,
            deleted_count,
            dry_run: false,
        })
    }
}
