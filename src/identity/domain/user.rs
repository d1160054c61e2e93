//! Registered user aggregate.

use super::{EmailAddress, IdentityDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A user known to the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: Option<String>,
    email: EmailAddress,
    image: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedUserData {
    /// Persisted identifier.
    pub id: UserId,
    /// Persisted display name.
    pub name: Option<String>,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted avatar URL.
    pub image: Option<String>,
    /// Persisted registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Registers a new user with a freshly generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyName`] when the name is blank.
    pub fn register(
        name: &str,
        email: EmailAddress,
        image: Option<String>,
        clock: &impl Clock,
    ) -> Result<Self, IdentityDomainError> {
        let normalized_name = name.trim();
        if normalized_name.is_empty() {
            return Err(IdentityDomainError::EmptyName);
        }

        Ok(Self {
            id: UserId::generate(),
            name: Some(normalized_name.to_owned()),
            email,
            image: image.filter(|url| !url.trim().is_empty()),
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a user from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedUserData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            email: data.email,
            image: data.image,
            created_at: data.created_at,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the avatar URL, if any.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
