use codegate_activation::usecase::health::{DataCounts, HealthReportUseCase};

use crate::helpers::{MockAdminRepo, MockCodeRepo};

#[tokio::test]
async fn should_report_counts_when_database_answers() {
    let usecase = HealthReportUseCase {
        codes: MockCodeRepo::with_codes(&["A-1", "A-2", "A-3"]),
        admins: MockAdminRepo::with_admin("admin", "admin123"),
    };

    let report = usecase.execute(true).await;

    assert!(report.is_healthy());
    assert_eq!(
        report.data,
        Some(DataCounts {
            admin_users: 1,
            activation_codes: 3,
        })
    );
    assert_eq!(report.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn should_skip_counts_when_database_unreachable() {
    let codes = MockCodeRepo::with_codes(&["A-1"]);
    let usecase = HealthReportUseCase {
        codes: codes.clone(),
        admins: MockAdminRepo::empty(),
    };

    let report = usecase.execute(false).await;

    assert!(!report.is_healthy());
    assert_eq!(report.data, None);
}

#[tokio::test]
async fn should_be_unhealthy_when_counts_fail() {
    let codes = MockCodeRepo::with_codes(&["A-1"]);
    codes.set_failing(true);
    let usecase = HealthReportUseCase {
        codes,
        admins: MockAdminRepo::with_admin("admin", "admin123"),
    };

    let report = usecase.execute(true).await;

    assert!(report.database_reachable);
    assert!(!report.is_healthy());
    assert_eq!(report.data, None);
}
