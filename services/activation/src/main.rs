use std::sync::Arc;

use sea_orm::Database;
use tokio::sync::watch;
use tracing::{info, warn};

use codegate_activation::bootstrap::bootstrap;
use codegate_activation::config::ActivationConfig;
use codegate_activation::jobs::expiry_sweeper::ExpirySweeper;
use codegate_activation::router::build_router;
use codegate_activation::state::AppState;
use codegate_core::config::Config;
use codegate_core::tracing::{DEFAULT_FILTER, init_tracing};

#[tokio::main]
async fn main() {
    init_tracing(DEFAULT_FILTER);

    let config = ActivationConfig::from_env();

    let db = Arc::new(
        Database::connect(&config.database_url)
            .await
            .expect("failed to connect to database"),
    );

    bootstrap(&db, &config).await;

    let state = AppState {
        db,
        tokens: config.token_settings(),
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = ExpirySweeper::new(state.code_repo(), config.sweep_interval());
    let sweeper_handle = tokio::spawn(sweeper.run(shutdown_rx));

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.activation_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("activation service listening on {addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    let _ = shutdown_tx.send(true);
    match tokio::time::timeout(config.shutdown_grace(), sweeper_handle).await {
        Ok(_) => info!("shutdown complete"),
        Err(_) => warn!(
            grace_secs = config.shutdown_grace_secs,
            "expiry sweeper still running after grace period, exiting anyway"
        ),
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received, draining connections");
}
