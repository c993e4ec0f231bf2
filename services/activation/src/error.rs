use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use codegate_domain::pagination::InvalidPageSize;

use crate::domain::types::{MAX_GENERATE_COUNT, MIN_GENERATE_COUNT};

/// Activation service error variants.
///
/// Validation outcomes (not found, expired, invalidated, ...) are not errors; they
/// travel as `ValidationOutcome`. These variants cover admin input errors, missing
/// resources and storage failures.
#[derive(Debug, thiserror::Error)]
pub enum ActivationServiceError {
    #[error("count must be between {min} and {max}", min = MIN_GENERATE_COUNT, max = MAX_GENERATE_COUNT)]
    InvalidCount,
    #[error("{0}")]
    InvalidPageSize(#[from] InvalidPageSize),
    #[error("Pattern is required")]
    PatternRequired,
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(String),
    #[error("Code not found")]
    CodeNotFound,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Invalid old password")]
    WrongPassword,
    #[error("New password must be at least {0} characters")]
    WeakPassword(usize),
    #[error("activation code already exists")]
    DuplicateCode,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ActivationServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCount => "INVALID_COUNT",
            Self::InvalidPageSize(_) => "INVALID_PAGE_SIZE",
            Self::PatternRequired => "PATTERN_REQUIRED",
            Self::InvalidPattern(_) => "INVALID_PATTERN",
            Self::CodeNotFound => "CODE_NOT_FOUND",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::WrongPassword => "WRONG_PASSWORD",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::DuplicateCode => "DUPLICATE_CODE",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ActivationServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidCount
            | Self::InvalidPageSize(_)
            | Self::PatternRequired
            | Self::InvalidPattern(_)
            | Self::WrongPassword
            | Self::WeakPassword(_) => StatusCode::BAD_REQUEST,
            Self::CodeNotFound => StatusCode::NOT_FOUND,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::DuplicateCode => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx are expected client errors; only internal errors carry a cause worth logging.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
