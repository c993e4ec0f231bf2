use crate::domain::repository::{ActivationCodeRepository, AdminRepository};

/// Detailed health snapshot behind `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub database_reachable: bool,
    /// Row counts; `None` when the database is unreachable or the counts failed.
    pub data: Option<DataCounts>,
    pub version: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataCounts {
    pub admin_users: u64,
    pub activation_codes: u64,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.database_reachable && self.data.is_some()
    }
}

pub struct HealthReportUseCase<C, A>
where
    C: ActivationCodeRepository,
    A: AdminRepository,
{
    pub codes: C,
    pub admins: A,
}

impl<C, A> HealthReportUseCase<C, A>
where
    C: ActivationCodeRepository,
    A: AdminRepository,
{
    /// Counts are only attempted once the caller has confirmed the database answers.
    pub async fn execute(&self, database_reachable: bool) -> HealthReport {
        let data = if database_reachable {
            self.counts().await
        } else {
            None
        };
        HealthReport {
            database_reachable,
            data,
            version: env!("CARGO_PKG_VERSION"),
        }
    }

    async fn counts(&self) -> Option<DataCounts> {
        let admin_users = match self.admins.count().await {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(error = ?e, "health: admin count failed");
                return None;
            }
        };
        let activation_codes = match self.codes.count().await {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(error = ?e, "health: code count failed");
                return None;
            }
        };
        Some(DataCounts {
            admin_users,
            activation_codes,
        })
    }
}
