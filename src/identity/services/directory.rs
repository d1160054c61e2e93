//! Service layer for user signup and lookup.

use crate::identity::{
    domain::{EmailAddress, IdentityDomainError, User, UserId},
    ports::{UserRepository, UserRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for registering a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    name: String,
    email: String,
    image: Option<String>,
}

impl SignUpRequest {
    /// Creates a request with required signup fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            image: None,
        }
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Service-level errors for user directory operations.
#[derive(Debug, Error)]
pub enum UserDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// A user with the same email is already registered.
    #[error("user already exists")]
    AlreadyExists(EmailAddress),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for user directory operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User signup and lookup orchestration service.
#[derive(Clone)]
pub struct UserDirectoryService<U, C>
where
    U: UserRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<U>,
    clock: Arc<C>,
}

impl<U, C> UserDirectoryService<U, C>
where
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new user directory service.
    #[must_use]
    pub const fn new(repository: Arc<U>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::AlreadyExists`] when the email is already
    /// registered, [`UserDirectoryError::Domain`] for invalid input and
    /// [`UserDirectoryError::Repository`] when persistence fails.
    pub async fn sign_up(&self, request: SignUpRequest) -> UserDirectoryResult<User> {
        let SignUpRequest { name, email, image } = request;
        let address = EmailAddress::new(email)?;

        if self.repository.find_by_email(&address).await?.is_some() {
            tracing::info!(email = %address, "signup rejected for existing email");
            return Err(UserDirectoryError::AlreadyExists(address));
        }

        let user = User::register(&name, address, image, &*self.clock)?;
        self.repository.store(&user).await.map_err(|err| match err {
            UserRepositoryError::DuplicateEmail(existing) => {
                UserDirectoryError::AlreadyExists(existing)
            }
            other => UserDirectoryError::Repository(other),
        })?;
        tracing::info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    /// Finds a user by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Repository`] when lookup fails.
    pub async fn find_by_id(&self, id: &UserId) -> UserDirectoryResult<Option<User>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Lists every registered user, e.g. to populate an assignee picker.
    ///
    /// # Errors
    ///
    /// Returns [`UserDirectoryError::Repository`] when lookup fails.
    pub async fn list_users(&self) -> UserDirectoryResult<Vec<User>> {
        Ok(self.repository.list_all().await?)
    }
}
