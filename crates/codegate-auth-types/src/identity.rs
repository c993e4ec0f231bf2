//! Bearer-token admin identity extractor.

use axum::extract::{FromRef, FromRequestParts};
use http::header::AUTHORIZATION;
use http::request::Parts;

use codegate_core::error::AppError;

use crate::token::{TokenSettings, validate_admin_token};

/// An authenticated admin, taken from `Authorization: Bearer <token>`.
///
/// Rejects with 401 when the header is absent or the token fails validation.
/// The service state must expose [`TokenSettings`] through `FromRef`.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub username: String,
    pub token_id: String,
}

fn bearer_token(parts: &Parts) -> Option<String> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))?
        .trim();
    (!token.is_empty()).then(|| token.to_owned())
}

impl<S> FromRequestParts<S> for AdminIdentity
where
    S: Send + Sync,
    TokenSettings: FromRef<S>,
{
    type Rejection = AppError;

    // Extract synchronously and hand back a 'static future; an `async fn` here
    // would capture the `parts` lifetime and fail to match the trait (E0195).
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_token(parts);
        let settings = TokenSettings::from_ref(state);

        async move {
            let token =
                token.ok_or_else(|| AppError::unauthorized("Authorization token is missing"))?;
            let claims = validate_admin_token(&token, &settings).map_err(|e| {
                tracing::debug!(error = %e, "rejected admin token");
                AppError::unauthorized("Invalid or expired token")
            })?;
            Ok(Self {
                username: claims.sub,
                token_id: claims.jti,
            })
        }
    }
}
