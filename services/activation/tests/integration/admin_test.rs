use codegate_activation::error::ActivationServiceError;
use codegate_activation::usecase::admin::{
    BootstrapAdminInput, BootstrapAdminUseCase, ChangePasswordInput, ChangePasswordUseCase,
    LoginInput, LoginUseCase,
};
use codegate_auth_types::password::verify_password;
use codegate_auth_types::token::validate_admin_token;
use codegate_testing::auth::test_token_settings;

use crate::helpers::MockAdminRepo;

fn login(username: &str, password: &str) -> LoginInput {
    LoginInput {
        username: username.to_owned(),
        password: password.to_owned(),
    }
}

fn change(old: &str, new: &str) -> ChangePasswordInput {
    ChangePasswordInput {
        username: "admin".to_owned(),
        old_password: old.to_owned(),
        new_password: new.to_owned(),
    }
}

#[tokio::test]
async fn should_bootstrap_admin_only_once() {
    let repo = MockAdminRepo::empty();
    let uc = BootstrapAdminUseCase {
        admins: repo.clone(),
    };
    let input = || BootstrapAdminInput {
        username: "admin".to_owned(),
        password: "admin".to_owned(),
    };

    assert!(uc.execute(input()).await.unwrap());
    assert!(!uc.execute(input()).await.unwrap());

    assert_eq!(repo.admins.lock().unwrap().len(), 1);
    let hash = repo.password_hash_of("admin").unwrap();
    assert_ne!(hash, "admin");
    assert!(verify_password("admin", &hash).unwrap());
}

#[tokio::test]
async fn should_issue_token_on_valid_login() {
    let uc = LoginUseCase {
        admins: MockAdminRepo::with_admin("admin", "correct horse"),
        tokens: test_token_settings(),
    };

    let issued = uc.execute(login("admin", "correct horse")).await.unwrap();

    let claims = validate_admin_token(&issued.token, &test_token_settings()).unwrap();
    assert_eq!(claims.sub, "admin");
}

#[tokio::test]
async fn should_reject_wrong_password_and_unknown_user_alike() {
    let uc = LoginUseCase {
        admins: MockAdminRepo::with_admin("admin", "correct horse"),
        tokens: test_token_settings(),
    };

    for (user, pass) in [("admin", "wrong"), ("ghost", "correct horse")] {
        let err = uc.execute(login(user, pass)).await.unwrap_err();
        assert!(matches!(err, ActivationServiceError::InvalidCredentials), "got {err:?}");
    }
}

#[tokio::test]
async fn should_change_password() {
    let repo = MockAdminRepo::with_admin("admin", "old-secret");
    let uc = ChangePasswordUseCase {
        admins: repo.clone(),
    };

    uc.execute(change("old-secret", "new-secret")).await.unwrap();

    let hash = repo.password_hash_of("admin").unwrap();
    assert!(verify_password("new-secret", &hash).unwrap());
    assert!(!verify_password("old-secret", &hash).unwrap());
}

#[tokio::test]
async fn should_reject_wrong_old_password() {
    let repo = MockAdminRepo::with_admin("admin", "old-secret");
    let uc = ChangePasswordUseCase {
        admins: repo.clone(),
    };

    let err = uc.execute(change("guess", "new-secret")).await.unwrap_err();
    assert!(matches!(err, ActivationServiceError::WrongPassword), "got {err:?}");
    assert!(verify_password("old-secret", &repo.password_hash_of("admin").unwrap()).unwrap());
}

#[tokio::test]
async fn should_reject_short_new_password() {
    let uc = ChangePasswordUseCase {
        admins: MockAdminRepo::with_admin("admin", "old-secret"),
    };

    let err = uc.execute(change("old-secret", "12345")).await.unwrap_err();
    assert!(matches!(err, ActivationServiceError::WeakPassword(6)), "got {err:?}");
}
