use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use codegate_auth_types::identity::AdminIdentity;
use codegate_core::serde::{to_rfc3339_ms, to_rfc3339_ms_opt};
use codegate_domain::id::CodeId;
use codegate_domain::pagination::{CursorRequest, DEFAULT_PAGE_SIZE};

use crate::domain::types::{ActivationCode, CodeStats, MAX_ECHOED_CODES};
use crate::error::ActivationServiceError;
use crate::infra::db::run_migrations;
use crate::state::AppState;
use crate::usecase::batch_delete::{BatchDeleteInput, BatchDeleteUseCase};
use crate::usecase::cleanup::DeleteExpiredUseCase;
use crate::usecase::codes::{CodeStatsUseCase, DeleteCodeUseCase, ListCodesInput, ListCodesUseCase};
use crate::usecase::generate::{GenerateCodesInput, GenerateCodesUseCase};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeResponse {
    pub id: CodeId,
    pub code: String,
    pub is_used: bool,
    #[serde(serialize_with = "to_rfc3339_ms_opt")]
    pub activated_at: Option<DateTime<Utc>>,
    #[serde(serialize_with = "to_rfc3339_ms_opt")]
    pub expires_at: Option<DateTime<Utc>>,
    pub validation_count: u32,
    #[serde(serialize_with = "to_rfc3339_ms_opt")]
    pub last_validated_at: Option<DateTime<Utc>>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<ActivationCode> for CodeResponse {
    fn from(c: ActivationCode) -> Self {
        Self {
            id: c.id,
            code: c.code,
            is_used: c.is_used,
            activated_at: c.activated_at,
            expires_at: c.expires_at,
            validation_count: c.validation_count,
            last_validated_at: c.last_validated_at,
            created_at: c.created_at,
        }
    }
}

// ── Generate ─────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GenerateCodesRequest {
    pub count: u32,
    #[serde(default)]
    pub prefix: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateCodesResponse {
    pub message: String,
    pub count: usize,
    pub prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

pub async fn generate_codes(
    State(state): State<AppState>,
    _admin: AdminIdentity,
    Json(body): Json<GenerateCodesRequest>,
) -> Result<Json<GenerateCodesResponse>, ActivationServiceError> {
    let usecase = GenerateCodesUseCase {
        codes: state.code_repo(),
    };
    let generated = usecase
        .execute(GenerateCodesInput {
            count: body.count,
            prefix: body.prefix,
        })
        .await?;

    let count = generated.codes.len();
    let (codes, note) = if count <= MAX_ECHOED_CODES {
        (Some(generated.codes), None)
    } else {
        (
            None,
            Some("Use GET /api/admin/codes to retrieve the generated codes".to_owned()),
        )
    };
    Ok(Json(GenerateCodesResponse {
        message: format!("Successfully generated {count} activation codes"),
        count,
        prefix: generated.prefix,
        codes,
        note,
    }))
}

// ── List / stats ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCodesQuery {
    pub is_used: Option<bool>,
    pub skip_token: Option<i64>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCodesResponse {
    pub codes: Vec<CodeResponse>,
    pub total_count: u64,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_skip_token: Option<CodeId>,
    pub has_more: bool,
}

pub async fn list_codes(
    State(state): State<AppState>,
    _admin: AdminIdentity,
    Query(query): Query<ListCodesQuery>,
) -> Result<Json<ListCodesResponse>, ActivationServiceError> {
    let cursor = CursorRequest {
        skip_token: query.skip_token.map(CodeId),
        page_size: query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    };
    let usecase = ListCodesUseCase {
        codes: state.code_repo(),
    };
    let result = usecase
        .execute(ListCodesInput {
            is_used: query.is_used,
            cursor,
        })
        .await?;

    Ok(Json(ListCodesResponse {
        codes: result.page.items.into_iter().map(Into::into).collect(),
        total_count: result.total_count,
        page_size: cursor.page_size,
        next_skip_token: result.page.next_cursor,
        has_more: result.page.has_more,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeStatsResponse {
    pub total_codes: u64,
    pub unused_codes: u64,
    pub used_codes: u64,
    pub active_codes: u64,
}

impl From<CodeStats> for CodeStatsResponse {
    fn from(s: CodeStats) -> Self {
        Self {
            total_codes: s.total,
            unused_codes: s.unused,
            used_codes: s.used,
            active_codes: s.active,
        }
    }
}

pub async fn code_stats(
    State(state): State<AppState>,
    _admin: AdminIdentity,
) -> Result<Json<CodeStatsResponse>, ActivationServiceError> {
    let usecase = CodeStatsUseCase {
        codes: state.code_repo(),
    };
    Ok(Json(usecase.execute().await?.into()))
}

// ── Delete ───────────────────────────────────────────────────────────────────

pub async fn delete_code(
    State(state): State<AppState>,
    _admin: AdminIdentity,
    Path(code): Path<String>,
) -> Result<Json<Value>, ActivationServiceError> {
    let usecase = DeleteCodeUseCase {
        codes: state.code_repo(),
    };
    usecase.execute(&code).await?;
    Ok(Json(json!({ "message": "Code deleted successfully" })))
}

pub async fn delete_expired_codes(
    State(state): State<AppState>,
    _admin: AdminIdentity,
) -> Result<Json<Value>, ActivationServiceError> {
    let usecase = DeleteExpiredUseCase {
        codes: state.code_repo(),
    };
    let deleted = usecase.execute().await?;
    tracing::info!(deleted, "deleted expired codes on admin request");
    Ok(Json(json!({
        "message": format!("Deleted {deleted} expired codes"),
        "deletedCount": deleted,
    })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDeleteRequest {
    #[serde(default)]
    pub pattern: String,
    #[serde(default)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDeleteResponse {
    pub success: bool,
    pub message: String,
    pub matched_count: usize,
    pub deleted_count: u64,
    pub matched_codes: Vec<String>,
    pub was_dry_run: bool,
}

pub async fn batch_delete_codes(
    State(state): State<AppState>,
    _admin: AdminIdentity,
    Json(body): Json<BatchDeleteRequest>,
) -> Result<Json<BatchDeleteResponse>, ActivationServiceError> {
    let usecase = BatchDeleteUseCase {
        codes: state.code_repo(),
    };
    let result = usecase
        .execute(BatchDeleteInput {
            pattern: body.pattern,
            dry_run: body.dry_run,
        })
        .await?;

    let matched_count = result.matched_count();
    let message = if result.dry_run {
        format!("Dry run completed. Found {matched_count} matching codes")
    } else {
        format!("Successfully deleted {} codes", result.deleted_count)
    };
    Ok(Json(BatchDeleteResponse {
        success: true,
        message,
        matched_count,
        deleted_count: result.deleted_count,
        matched_codes: result.matched_codes,
        was_dry_run: result.dry_run,
    }))
}

// ── Storage ──────────────────────────────────────────────────────────────────

pub async fn init_database(
    State(state): State<AppState>,
    _admin: AdminIdentity,
) -> Result<Json<Value>, ActivationServiceError> {
    run_migrations(&state.db).await?;
    tracing::info!("database initialized on admin request");
    Ok(Json(json!({ "message": "Database initialized successfully" })))
}
