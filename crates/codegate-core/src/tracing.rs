use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used by services when `RUST_LOG` is unset: sqlx logs every statement at `info`.
pub const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Initialize JSON tracing on stdout. `RUST_LOG` wins over `default_filter`.
///
/// Only the first call installs a subscriber.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().with_current_span(false))
        .try_init();
}
