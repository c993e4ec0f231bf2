use axum::{
    Router,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use codegate_core::error::not_found;
use codegate_core::health::healthz;
use codegate_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    activation::validate_code,
    admin::{change_password, login},
    codes::{
        batch_delete_codes, code_stats, delete_code, delete_expired_codes, generate_codes,
        init_database, list_codes,
    },
    health::{health, readyz, startupz},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let admin = Router::new()
        // Session
        .route("/login", post(login))
        .route("/change-password", post(change_password))
        // Codes
        .route("/generate-codes", post(generate_codes))
        .route("/codes", get(list_codes))
        .route("/codes/expired", delete(delete_expired_codes))
        .route("/codes/batch-delete", post(batch_delete_codes))
        .route("/codes/{code}", delete(delete_code))
        .route("/stats", get(code_stats))
        // Storage
        .route("/init-database", post(init_database));

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/startupz", get(startupz))
        .route("/health", get(health))
        // Public validation
        .route("/api/activation/validate", post(validate_code))
        .nest("/api/admin", admin)
        .fallback(not_found)
        // Outermost first: the id is assigned before tracing and copied to the response.
        // CORS sits innermost; it needs a `Default` response body, which the trace body lacks.
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
