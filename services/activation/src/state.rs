use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use codegate_auth_types::token::TokenSettings;

use crate::infra::db::{DbActivationCodeRepository, DbAdminRepository};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub tokens: TokenSettings,
}

impl AppState {
    pub fn code_repo(&self) -> DbActivationCodeRepository {
        DbActivationCodeRepository {
            db: Arc::clone(&self.db),
        }
    }

    pub fn admin_repo(&self) -> DbAdminRepository {
        DbAdminRepository {
            db: Arc::clone(&self.db),
        }
    }
}

impl FromRef<AppState> for TokenSettings {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}
