//! Port through which the authentication provider's sessions are resolved.

use crate::identity::domain::Session;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Resolves opaque session tokens into signed-in users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// Returns the session for `token`, or `None` when the token is unknown
    /// or expired.
    ///
    /// # Errors
    ///
    /// Returns [`SessionResolverError`] when the provider cannot be reached.
    async fn resolve(&self, token: &str) -> Result<Option<Session>, SessionResolverError>;
}

/// Failure while talking to the session backend.
#[derive(Debug, Clone, Error)]
#[error("session lookup failed: {0}")]
pub struct SessionResolverError(pub Arc<dyn std::error::Error + Send + Sync>);

impl SessionResolverError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
