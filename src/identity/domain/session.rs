//! Authenticated session supplied by the authentication provider.

use super::{User, UserId};
use serde::{Deserialize, Serialize};

/// The signed-in user attached to a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    user_id: UserId,
    name: Option<String>,
    email: Option<String>,
    image: Option<String>,
}

impl Session {
    /// Creates a session for the given user identifier.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            name: None,
            email: None,
            image: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the avatar URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Returns the signed-in user's identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the signed-in user's display name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the signed-in user's email address.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the signed-in user's avatar URL.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

impl From<&User> for Session {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id().clone(),
            name: user.name().map(str::to_owned),
            email: Some(user.email().as_str().to_owned()),
            image: user.image().map(str::to_owned),
        }
    }
}
