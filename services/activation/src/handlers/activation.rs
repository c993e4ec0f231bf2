use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use codegate_core::serde::to_rfc3339_ms_opt;

use crate::domain::types::ValidationOutcome;
use crate::error::ActivationServiceError;
use crate::state::AppState;
use crate::usecase::validate::ValidateCodeUseCase;

#[derive(Deserialize)]
pub struct ValidateCodeRequest {
    /// Missing, null and blank are all rejected.
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateCodeResponse {
    pub is_valid: bool,
    pub message: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "to_rfc3339_ms_opt"
    )]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_validations: Option<u32>,
}

impl From<ValidationOutcome> for ValidateCodeResponse {
    fn from(outcome: ValidationOutcome) -> Self {
        Self {
            is_valid: outcome.is_valid(),
            message: outcome.message().to_owned(),
            expires_at: outcome.expires_at(),
            validation_count: outcome.validation_count(),
            remaining_validations: outcome.remaining_validations(),
        }
    }
}

fn status_of(outcome: &ValidationOutcome) -> StatusCode {
    match outcome {
        ValidationOutcome::NotFound => StatusCode::NOT_FOUND,
        ValidationOutcome::StillValid { .. } | ValidationOutcome::Activated { .. } => {
            StatusCode::OK
        }
        ValidationOutcome::Rejected
        | ValidationOutcome::Invalidated { .. }
        | ValidationOutcome::Expired { .. } => StatusCode::BAD_REQUEST,
    }
}

/// Handler for `POST /api/activation/validate`.
///
/// An unreadable body answers like a blank code instead of axum's plain-text rejection.
pub async fn validate_code(
    State(state): State<AppState>,
    body: Result<Json<ValidateCodeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ValidateCodeResponse>), ActivationServiceError> {
    let code = match body {
        Ok(Json(ValidateCodeRequest { code })) => code.unwrap_or_default(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "unreadable validation request");
            String::new()
        }
    };
    let usecase = ValidateCodeUseCase {
        codes: state.code_repo(),
    };
    let outcome = usecase.execute(&code).await?;
    Ok((status_of(&outcome), Json(outcome.into())))
}
