use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use codegate_core::health::{Readiness, Startup};

use crate::domain::repository::AdminRepository;
use crate::state::AppState;
use crate::usecase::health::{HealthReport, HealthReportUseCase};

/// Handler for `GET /readyz`: the database answers and bootstrap created an admin.
pub async fn readyz(State(state): State<AppState>) -> Readiness {
    if let Err(e) = state.db.ping().await {
        tracing::warn!(error = %e, "readiness: database ping failed");
        return Readiness::NotReady("database unavailable");
    }
    match state.admin_repo().exists_any().await {
        Ok(true) => Readiness::Ready,
        Ok(false) => Readiness::NotReady("no admin account"),
        Err(e) => {
            tracing::warn!(error = %e, "readiness: admin lookup failed");
            Readiness::NotReady("database unavailable")
        }
    }
}

/// Handler for `GET /startupz`: started once the database answers, admin or not.
pub async fn startupz(State(state): State<AppState>) -> Startup {
    match state.db.ping().await {
        Ok(()) => Startup::Started,
        Err(e) => {
            tracing::warn!(error = %e, "startup: database ping failed");
            Startup::Starting("database unavailable")
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    pub database: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_data: Option<DataCheck>,
    pub version: VersionCheck,
}

#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataCheck {
    pub status: &'static str,
    pub admin_users: u64,
    pub activation_codes: u64,
}

#[derive(Debug, Serialize)]
pub struct VersionCheck {
    pub status: &'static str,
    pub version: &'static str,
}

impl From<HealthReport> for HealthResponse {
    fn from(report: HealthReport) -> Self {
        let database = match (report.database_reachable, report.data.is_some()) {
            (false, _) => CheckStatus {
                status: "unhealthy",
                message: "Cannot connect",
            },
            (true, false) => CheckStatus {
                status: "unhealthy",
                message: "Connected, queries failing",
            },
            (true, true) => CheckStatus {
                status: "healthy",
                message: "Connected",
            },
        };
        Self {
            status: if report.is_healthy() {
                "healthy"
            } else {
                "unhealthy"
            },
            checks: HealthChecks {
                database,
                database_data: report.data.map(|data| DataCheck {
                    status: "healthy",
                    admin_users: data.admin_users,
                    activation_codes: data.activation_codes,
                }),
                version: VersionCheck {
                    status: "healthy",
                    version: report.version,
                },
            },
        }
    }
}

/// Handler for `GET /health`: 200 when every check passes, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database_reachable = match state.db.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "health: database ping failed");
            false
        }
    };
    let usecase = HealthReportUseCase {
        codes: state.code_repo(),
        admins: state.admin_repo(),
    };
    let report = usecase.execute(database_reachable).await;
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report.into()))
}
