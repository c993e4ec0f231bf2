//! Admin bearer tokens (JWT, HS256).

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Admin token lifetime in seconds (30 minutes).
pub const ADMIN_TOKEN_TTL_SECS: u64 = 1800;

/// Role claim carried by every admin token.
pub const ADMIN_ROLE: &str = "admin";

/// Signing and validation parameters shared by the issuer and the extractor.
#[derive(Clone)]
pub struct TokenSettings {
    /// HMAC secret for signing tokens.
    pub secret: String,
    /// Expected `iss` claim.
    pub issuer: String,
    /// Expected `aud` claim.
    pub audience: String,
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

/// Errors returned by [`issue_admin_token`] and [`validate_admin_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("token issued for another issuer or audience")]
    WrongAudience,
    #[error("token does not carry the admin role")]
    NotAdmin,
    #[error("malformed token")]
    Malformed,
    #[error("failed to sign token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// JWT claims payload for admin sessions.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `sub` | `sub` | admin username |
/// | `role` | custom | always [`ADMIN_ROLE`] |
/// | `jti` | `jti` | unique token id |
/// | `iss` / `aud` | `iss` / `aud` | must match [`TokenSettings`] |
/// | `iat` / `exp` | `iat` / `exp` | seconds since UNIX epoch |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub role: String,
    pub jti: String,
    pub iss: String,
    pub aud: String,
    pub iat: u64,
    pub exp: u64,
}

/// A freshly signed token and its expiry (seconds since epoch).
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

fn sign(claims: &AdminClaims, settings: &TokenSettings) -> Result<String, AuthError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(settings.secret.as_bytes()),
    )
    .map_err(AuthError::Signing)
}

/// Sign a new admin session token for `username`.
pub fn issue_admin_token(
    username: &str,
    settings: &TokenSettings,
) -> Result<IssuedToken, AuthError> {
    let iat = now_secs();
    let claims = AdminClaims {
        sub: username.to_owned(),
        role: ADMIN_ROLE.to_owned(),
        jti: Uuid::new_v4().to_string(),
        iss: settings.issuer.clone(),
        aud: settings.audience.clone(),
        iat,
        exp: iat + ADMIN_TOKEN_TTL_SECS,
    };
    let token = sign(&claims, settings)?;
    Ok(IssuedToken {
        token,
        expires_at: claims.exp,
    })
}

/// Validate a bearer token and return its claims.
///
/// Validation: HS256, `exp` checked with zero leeway, `iss` and `aud` must match
/// the settings, and the role claim must be [`ADMIN_ROLE`].
pub fn validate_admin_token(token: &str, settings: &TokenSettings) -> Result<AdminClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;
    validation.set_issuer(&[settings.issuer.as_str()]);
    validation.set_audience(&[settings.audience.as_str()]);
    validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);

    let data = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(settings.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer
        | jsonwebtoken::errors::ErrorKind::InvalidAudience => AuthError::WrongAudience,
        _ => AuthError::Malformed,
    })?;

    if data.claims.role != ADMIN_ROLE {
        return Err(AuthError::NotAdmin);
    }
    Ok(data.claims)
}
