use chrono::{Duration, Utc};

use codegate_activation::error::ActivationServiceError;
use codegate_activation::usecase::codes::{
    CodeStatsUseCase, DeleteCodeUseCase, ListCodesInput, ListCodesUseCase,
};
use codegate_activation::usecase::seed::{DEMO_CODES, SeedDemoCodesUseCase};
use codegate_domain::id::CodeId;
use codegate_domain::pagination::CursorRequest;

use crate::helpers::{MockCodeRepo, activated_code};

fn list_input(is_used: Option<bool>, skip_token: Option<i64>, page_size: u32) -> ListCodesInput {
    ListCodesInput {
        is_used,
        cursor: CursorRequest {
            skip_token: skip_token.map(CodeId),
            page_size,
        },
    }
}

#[tokio::test]
async fn should_page_by_id_cursor() {
    let repo = MockCodeRepo::with_codes(&["A-1", "A-2", "A-3", "A-4", "A-5"]);
    let uc = ListCodesUseCase { codes: repo };

    let first = uc.execute(list_input(None, None, 2)).await.unwrap();
    let ids: Vec<_> = first.page.items.iter().map(|c| c.id.0).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(first.total_count, 5);
    assert!(first.page.has_more);
    assert_eq!(first.page.next_cursor, Some(CodeId(2)));

    let second = uc.execute(list_input(None, Some(2), 2)).await.unwrap();
    let ids: Vec<_> = second.page.items.iter().map(|c| c.id.0).collect();
    assert_eq!(ids, vec![3, 4]);
    assert_eq!(second.total_count, 3);

    let last = uc.execute(list_input(None, Some(4), 2)).await.unwrap();
    assert_eq!(last.page.items.len(), 1);
    assert!(!last.page.has_more);
    assert_eq!(last.page.next_cursor, None);
}

#[tokio::test]
async fn should_filter_by_usage() {
    let repo = MockCodeRepo::with_codes(&["U-1", "U-2"]);
    repo.push(activated_code("USED-1", Utc::now()));
    let uc = ListCodesUseCase { codes: repo };

    let used = uc.execute(list_input(Some(true), None, 100)).await.unwrap();
    assert_eq!(used.total_count, 1);
    assert_eq!(used.page.items[0].code, "USED-1");

    let unused = uc.execute(list_input(Some(false), None, 100)).await.unwrap();
    assert_eq!(unused.total_count, 2);
    assert!(unused.page.items.iter().all(|c| !c.is_used));
}

#[tokio::test]
async fn should_reject_out_of_range_page_size() {
    let uc = ListCodesUseCase {
        codes: MockCodeRepo::empty(),
    };
    for page_size in [0, 1001] {
        let err = uc.execute(list_input(None, None, page_size)).await.unwrap_err();
        assert!(matches!(err, ActivationServiceError::InvalidPageSize(_)), "got {err:?}");
    }
}

#[tokio::test]
async fn should_count_stats() {
    let now = Utc::now();
    let repo = MockCodeRepo::with_codes(&["NEW-1", "NEW-2"]);
    repo.push(activated_code("LIVE-1", now - Duration::days(1)));
    repo.push(activated_code("OLD-1", now - Duration::days(9)));

    let stats = CodeStatsUseCase { codes: repo }.execute().await.unwrap();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.unused, 2);
    assert_eq!(stats.used, 2);
    assert_eq!(stats.active, 1);
}

#[tokio::test]
async fn should_delete_single_code() {
    let repo = MockCodeRepo::with_codes(&["KEEP-1", "DROP-1"]);
    let uc = DeleteCodeUseCase {
        codes: repo.clone(),
    };

    uc.execute("DROP-1").await.unwrap();
    assert_eq!(repo.code_strings(), vec!["KEEP-1"]);

    let err = uc.execute("DROP-1").await.unwrap_err();
    assert!(matches!(err, ActivationServiceError::CodeNotFound));
}

#[tokio::test]
async fn should_seed_demo_codes_only_into_empty_store() {
    let repo = MockCodeRepo::empty();
    let uc = SeedDemoCodesUseCase {
        codes: repo.clone(),
    };

    assert_eq!(uc.execute(Utc::now()).await.unwrap(), DEMO_CODES.len());
    assert_eq!(repo.code_strings(), DEMO_CODES.to_vec());

    assert_eq!(uc.execute(Utc::now()).await.unwrap(), 0);
    assert_eq!(repo.code_strings().len(), DEMO_CODES.len());
}
