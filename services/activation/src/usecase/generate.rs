use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::RngExt;

use crate::domain::repository::ActivationCodeRepository;
use crate::domain::types::{
    CODE_SUFFIX_LEN, DEFAULT_CODE_PREFIX, GENERATE_BATCH_SIZE, MAX_GENERATE_COUNT,
    MIN_GENERATE_COUNT, NewActivationCode,
};
use crate::error::ActivationServiceError;

/// Charset for code suffixes (uppercase hex).
const CHARSET: &[u8] = b"0123456789ABCDEF";

/// Attempts per batch before a uniqueness collision is reported.
const MAX_BATCH_ATTEMPTS: u32 = 3;

fn generate_suffix() -> String {
    let mut rng = rand::rng();
    (0..CODE_SUFFIX_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// `size` distinct codes of the form `<prefix>-<suffix>`.
fn generate_batch(prefix: &str, size: usize) -> Vec<String> {
    let mut seen = HashSet::with_capacity(size);
    while seen.len() < size {
        seen.insert(format!("{prefix}-{}", generate_suffix()));
    }
    seen.into_iter().collect()
}

pub struct GenerateCodesInput {
    pub count: u32,
    pub prefix: Option<String>,
}

#[derive(Debug)]
pub struct GeneratedCodes {
    pub prefix: String,
    pub codes: Vec<String>,
}

pub struct GenerateCodesUseCase<R>
where
    R: ActivationCodeRepository,
{
    pub codes: R,
}

impl<R> GenerateCodesUseCase<R>
where
    R: ActivationCodeRepository,
{
    pub async fn execute(
        &self,
        input: GenerateCodesInput,
    ) -> Result<GeneratedCodes, ActivationServiceError> {
        // 1. Bound the request → 400 before any insert
        if !(MIN_GENERATE_COUNT..=MAX_GENERATE_COUNT).contains(&input.count) {
            return Err(ActivationServiceError::InvalidCount);
        }
        let prefix = input
            .prefix
            .map(|p| p.trim().to_owned())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_CODE_PREFIX.to_owned());

        // 2. Insert batch by batch; each batch is its own statement
        let total = input.count as usize;
        let mut generated = Vec::with_capacity(total);
        while generated.len() < total {
            let size = (total - generated.len()).min(GENERATE_BATCH_SIZE);
            let batch = self.insert_batch(&prefix, size, Utc::now()).await?;
            generated.extend(batch);
        }

        tracing::info!(count = generated.len(), %prefix, "generated activation codes");
        Ok(GeneratedCodes {
            prefix,
            codes: generated,
        })
    }

    /// Insert one batch, regenerating it whenever the store reports a duplicate.
    async fn insert_batch(
        &self,
        prefix: &str,
        size: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<String>, ActivationServiceError> {
        for attempt in 1..=MAX_BATCH_ATTEMPTS {
            let codes = generate_batch(prefix, size);
            let rows: Vec<NewActivationCode> = codes
                .iter()
                .map(|code| NewActivationCode {
                    code: code.clone(),
                    created_at: now,
                })
                .collect();
            match self.codes.insert_many(&rows).await {
                Ok(()) => return Ok(codes),
                Err(ActivationServiceError::DuplicateCode) => {
                    tracing::warn!(attempt, size, "code collision, regenerating batch");
                }
                Err(e) => return Err(e),
            }
        }
        Err(ActivationServiceError::DuplicateCode)
    }
}
