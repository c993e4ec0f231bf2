use std::collections::HashSet;
use std::sync::atomic::Ordering;

use codegate_activation::error::ActivationServiceError;
use codegate_activation::usecase::generate::{GenerateCodesInput, GenerateCodesUseCase};

use crate::helpers::MockCodeRepo;

fn input(count: u32, prefix: Option<&str>) -> GenerateCodesInput {
    GenerateCodesInput {
        count,
        prefix: prefix.map(str::to_owned),
    }
}

fn is_well_formed(code: &str, prefix: &str) -> bool {
    code.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|suffix| {
            suffix.len() == 12
                && suffix
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        })
}

#[tokio::test]
async fn should_generate_requested_count_with_prefix() {
    let repo = MockCodeRepo::empty();
    let uc = GenerateCodesUseCase {
        codes: repo.clone(),
    };

    let generated = uc.execute(input(25, Some("VIP"))).await.unwrap();

    assert_eq!(generated.prefix, "VIP");
    assert_eq!(generated.codes.len(), 25);
    assert!(generated.codes.iter().all(|c| is_well_formed(c, "VIP")));

    let stored: HashSet<_> = repo.code_strings().into_iter().collect();
    let returned: HashSet<_> = generated.codes.into_iter().collect();
    assert_eq!(stored, returned);
}

#[tokio::test]
async fn should_default_blank_prefix_to_code() {
    let repo = MockCodeRepo::empty();
    let uc = GenerateCodesUseCase {
        codes: repo.clone(),
    };

    for prefix in [None, Some(""), Some("   ")] {
        let generated = uc.execute(input(1, prefix)).await.unwrap();
        assert_eq!(generated.prefix, "CODE");
        assert!(is_well_formed(&generated.codes[0], "CODE"));
    }
}

#[tokio::test]
async fn should_insert_in_batches_of_one_thousand() {
    let repo = MockCodeRepo::empty();
    let uc = GenerateCodesUseCase {
        codes: repo.clone(),
    };

    let generated = uc.execute(input(2500, None)).await.unwrap();

    assert_eq!(generated.codes.len(), 2500);
    assert_eq!(repo.insert_calls.load(Ordering::SeqCst), 3);
    let unique: HashSet<_> = repo.code_strings().into_iter().collect();
    assert_eq!(unique.len(), 2500);
}

#[tokio::test]
async fn should_reject_out_of_range_count_before_inserting() {
    let repo = MockCodeRepo::empty();
    let uc = GenerateCodesUseCase {
        codes: repo.clone(),
    };

    for count in [0, 20_001] {
        let err = uc.execute(input(count, None)).await.unwrap_err();
        assert!(matches!(err, ActivationServiceError::InvalidCount), "got {err:?}");
    }
    assert_eq!(repo.insert_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn should_regenerate_batch_after_collision() {
    let repo = MockCodeRepo::empty();
    repo.collisions.store(2, Ordering::SeqCst);
    let uc = GenerateCodesUseCase {
        codes: repo.clone(),
    };

    let generated = uc.execute(input(10, None)).await.unwrap();

    assert_eq!(generated.codes.len(), 10);
    assert_eq!(repo.code_strings().len(), 10);
    assert_eq!(repo.insert_calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn should_give_up_after_repeated_collisions() {
    let repo = MockCodeRepo::empty();
    repo.collisions.store(u32::MAX, Ordering::SeqCst);
    let uc = GenerateCodesUseCase {
        codes: repo.clone(),
    };

    let err = uc.execute(input(10, None)).await.unwrap_err();

    assert!(matches!(err, ActivationServiceError::DuplicateCode), "got {err:?}");
    assert!(repo.code_strings().is_empty());
}

#[tokio::test]
async fn should_surface_storage_failure() {
    let repo = MockCodeRepo::empty();
    repo.set_failing(true);
    let uc = GenerateCodesUseCase { codes: repo };

    let err = uc.execute(input(5, None)).await.unwrap_err();
    assert!(matches!(err, ActivationServiceError::Internal(_)));
}
