use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Handler for `GET /healthz` (liveness).
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Body of a readiness probe: 200 `{status: "ready"}` or 503 `{status: "not_ready", reason}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    NotReady(&'static str),
}

impl IntoResponse for Readiness {
    fn into_response(self) -> Response {
        match self {
            Self::Ready => (
                StatusCode::OK,
                Json(serde_json::json!({ "status": "ready" })),
            )
                .into_response(),
            Self::NotReady(reason) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "status": "not_ready", "reason": reason })),
            )
                .into_response(),
        }
    }
}

/// Body of a startup probe: 200 `{status: "started"}` or 503 `{status: "starting", reason}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Startup {
    Started,
    Starting(&'static str),
}

impl IntoResponse for Startup {
    fn into_response(self) -> Response {
        match self {
            Self::Started => (
                StatusCode::OK,
                Json(serde_json::json!({ "status": "started" })),
            )
                .into_response(),
            Self::Starting(reason) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "status": "starting", "reason": reason })),
            )
                .into_response(),
        }
    }
}
