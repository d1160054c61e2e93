//! Bearer-token authentication extractor.

use super::error::ApiError;
use crate::application::ApplicationServices;
use crate::identity::{domain::Session, ports::SessionResolver};
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// Signed-in user resolved from the `Authorization: Bearer <token>` header.
///
/// Adding this extractor to a handler makes the route require a session.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Session);

impl AuthUser {
    /// Returns the resolved session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.0
    }
}

impl<A> FromRequestParts<A> for AuthUser
where
    A: ApplicationServices,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &A) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("missing Authorization header".to_owned()))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                ApiError::Unauthorized("expected Authorization: Bearer <token>".to_owned())
            })?;

        let session = state
            .sessions()
            .resolve(token)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("invalid or expired session".to_owned()))?;

        tracing::debug!(user_id = %session.user_id(), "request authenticated");
        Ok(Self(session))
    }
}
