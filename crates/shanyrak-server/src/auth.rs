use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use shanyrak_core::{AppError, User};

use crate::error::ApiError;
use crate::state::AppState;

/// Raw-token header accepted alongside `Authorization: Bearer`.
pub const LEGACY_TOKEN_HEADER: &str = "token";

/// Pull the access token out of the request headers.
///
/// `Authorization: Bearer <token>` wins (scheme matched case-insensitively);
/// otherwise the bare `token` header is used.
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|value| {
            let (scheme, token) = value.trim().split_once(' ')?;
            scheme
                .eq_ignore_ascii_case("bearer")
                .then(|| token.trim())
        })
        .filter(|token| !token.is_empty());

    bearer.or_else(|| {
        headers
            .get(LEGACY_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|token| !token.is_empty())
    })
}

/// The authenticated caller, resolved from the access token.
///
/// Handlers that take this extractor reject anonymous requests with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = extract_token(&parts.headers) else {
            tracing::warn!(path = %parts.uri.path(), "Request without access token");
            return Err(AppError::Unauthorized("Not authenticated".into()).into());
        };

        let user = state.accounts().current_user(token).await?;
        Ok(Self(user))
    }
}
