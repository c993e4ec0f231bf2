//! Mock admin sessions for router tests.
//!
//! `MockAdmin` signs a real bearer token with test settings, so requests pass the
//! same `AdminIdentity` extractor production traffic goes through.

use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};

use codegate_auth_types::token::{TokenSettings, issue_admin_token};

/// Secret used by [`test_token_settings`].
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// Token settings shared between a test router and [`MockAdmin`].
pub fn test_token_settings() -> TokenSettings {
    TokenSettings {
        secret: TEST_JWT_SECRET.to_owned(),
        issuer: "codegate-test".to_owned(),
        audience: "codegate-test".to_owned(),
    }
}

/// An admin session signed with a given set of token settings.
pub struct MockAdmin {
    pub username: String,
    pub token: String,
}

impl MockAdmin {
    /// Sign a token for `username` with [`test_token_settings`].
    pub fn new(username: &str) -> Self {
        Self::with_settings(username, &test_token_settings())
    }

    pub fn with_settings(username: &str, settings: &TokenSettings) -> Self {
        let issued = issue_admin_token(username, settings).unwrap();
        Self {
            username: username.to_owned(),
            token: issued.token,
        }
    }

    /// `Authorization: Bearer <token>` as a single header pair.
    pub fn authorization(&self) -> (HeaderName, HeaderValue) {
        (
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token)).unwrap(),
        )
    }
}
