//! Domain model for users and authenticated sessions.
//!
//! Credentials never enter this boundary: the authentication provider issues
//! session tokens and this domain only models who the resulting user is.

mod error;
mod ids;
mod session;
mod user;

pub use error::IdentityDomainError;
pub use ids::{EmailAddress, UserId};
pub use session::Session;
pub use user::{PersistedUserData, User};
