//! Error types for identity domain validation.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The user identifier exceeds the storage limit.
    #[error("user identifier exceeds {max} characters: {value}")]
    UserIdTooLong {
        /// Rejected identifier.
        value: String,
        /// Maximum permitted length.
        max: usize,
    },

    /// The email address is not of the form `local@domain`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The display name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyName,
}
