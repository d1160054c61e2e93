//! In-memory session store standing in for the authentication provider.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::identity::{
    domain::Session,
    ports::{SessionResolver, SessionResolverError},
};

/// Token-to-session map used by tests and local development.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionStore {
    /// Creates an empty session store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues `token` for `session`, replacing any previous holder.
    ///
    /// # Errors
    ///
    /// Returns [`SessionResolverError`] when the store lock is poisoned.
    pub fn issue(&self, token: impl Into<String>, session: Session) -> Result<(), SessionResolverError> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        sessions.insert(token.into(), session);
        Ok(())
    }

    /// Revokes `token`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionResolverError`] when the store lock is poisoned.
    pub fn revoke(&self, token: &str) -> Result<(), SessionResolverError> {
        let mut sessions = self.sessions.write().map_err(poisoned)?;
        sessions.remove(token);
        Ok(())
    }
}

fn poisoned(err: impl ToString) -> SessionResolverError {
    SessionResolverError::backend(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SessionResolver for InMemorySessionStore {
    async fn resolve(&self, token: &str) -> Result<Option<Session>, SessionResolverError> {
        let sessions = self.sessions.read().map_err(poisoned)?;
        Ok(sessions.get(token).cloned())
    }
}
