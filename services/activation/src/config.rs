use std::time::Duration;

use serde::Deserialize;

use codegate_auth_types::token::TokenSettings;
use codegate_core::config::Config;

use crate::jobs::expiry_sweeper::DEFAULT_SWEEP_INTERVAL_SECS;

/// Activation service configuration loaded from environment variables.
///
/// Not `Debug`: holds the JWT secret and the bootstrap password.
#[derive(Deserialize)]
pub struct ActivationConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing admin tokens.
    pub jwt_secret: String,
    #[serde(default = "default_jwt_claim")]
    pub jwt_issuer: String,
    #[serde(default = "default_jwt_claim")]
    pub jwt_audience: String,
    /// TCP port to listen on. Env var: `ACTIVATION_PORT`.
    #[serde(default = "default_port")]
    pub activation_port: u16,
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
    /// Upper bound on waiting for the sweeper after the server stops.
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
    /// Credentials for the admin created on first boot.
    #[serde(default = "default_admin")]
    pub admin_bootstrap_username: String,
    #[serde(default = "default_admin")]
    pub admin_bootstrap_password: String,
    /// Insert demo codes into an empty table at startup.
    #[serde(default)]
    pub seed_demo_codes: bool,
}

fn default_jwt_claim() -> String {
    "codegate".to_owned()
}

fn default_port() -> u16 {
    3120
}

fn default_sweep_interval_secs() -> u64 {
    DEFAULT_SWEEP_INTERVAL_SECS
}

fn default_shutdown_grace_secs() -> u64 {
    10
}

fn default_admin() -> String {
    "admin".to_owned()
}

impl Config for ActivationConfig {}

impl ActivationConfig {
    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings {
            secret: self.jwt_secret.clone(),
            issuer: self.jwt_issuer.clone(),
            audience: self.jwt_audience.clone(),
        }
    }

    /// Sweep period; never zero, `tokio::time::interval` panics on a zero period.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}
