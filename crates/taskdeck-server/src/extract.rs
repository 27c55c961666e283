//! Session extraction for authenticated routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use taskdeck_core::claims::AuthClaims;

use crate::errors::ApiError;
use crate::state::AppState;

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Verified session claims of the calling user.
///
/// Extracting this rejects the request with 401 when the bearer token is
/// missing, malformed, badly signed, or expired — handlers taking a
/// `Session` never see an unauthenticated request.
#[derive(Debug, Clone)]
pub struct Session(pub AuthClaims);

impl Session {
    /// The calling user's id.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.0.user_id()
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::Unauthorized)?;
        let claims = state.tokens.decrypt(token).ok_or(ApiError::Unauthorized)?;
        Ok(Self(claims))
    }
}
