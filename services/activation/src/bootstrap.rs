//! First-run setup executed before the server starts accepting traffic.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::DatabaseConnection;
use tracing::{error, info};

use crate::config::ActivationConfig;
use crate::infra::db::{DbActivationCodeRepository, DbAdminRepository, run_migrations};
use crate::usecase::admin::{BootstrapAdminInput, BootstrapAdminUseCase};
use crate::usecase::seed::SeedDemoCodesUseCase;

/// Migrate, create the first admin, then optionally seed demo codes.
///
/// Failures are logged and the service still starts; `/readyz` keeps reporting
/// not-ready until an admin exists.
pub async fn bootstrap(db: &Arc<DatabaseConnection>, config: &ActivationConfig) {
    if let Err(e) = run_migrations(db).await {
        error!(error = ?e, "migrations failed");
        return;
    }

    let admins = BootstrapAdminUseCase {
        admins: DbAdminRepository { db: Arc::clone(db) },
    };
    let input = BootstrapAdminInput {
        username: config.admin_bootstrap_username.clone(),
        password: config.admin_bootstrap_password.clone(),
    };
    if let Err(e) = admins.execute(input).await {
        error!(error = ?e, "admin bootstrap failed");
    }

    if config.seed_demo_codes {
        let seed = SeedDemoCodesUseCase {
            codes: DbActivationCodeRepository { db: Arc::clone(db) },
        };
        match seed.execute(Utc::now()).await {
            Ok(0) => {}
            Ok(inserted) => info!(inserted, "seeded demo activation codes"),
            Err(e) => error!(error = ?e, "demo code seeding failed"),
        }
    }
}
