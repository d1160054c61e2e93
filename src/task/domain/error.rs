//! Error types for task domain validation and parsing.

use crate::calendar::InvalidDateError;
use chrono::NaiveDate;
use crate::identity::domain::IdentityDomainError;
use thiserror::Error;

/// Errors returned while constructing or changing tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// Story points must not be negative.
    #[error("invalid points {0}, expected a non-negative integer")]
    InvalidPoints(i32),

    /// The due date precedes the start date.
    #[error("task due date {due} precedes start date {start}")]
    DueBeforeStart {
        /// Task start date.
        start: NaiveDate,
        /// Task due date.
        due: NaiveDate,
    },

    /// A date field could not be parsed.
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),

    /// An author or assignee reference is malformed.
    #[error(transparent)]
    InvalidUser(#[from] IdentityDomainError),

    /// A status value could not be parsed.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// A priority value could not be parsed.
    #[error(transparent)]
    InvalidPriority(#[from] ParseTaskPriorityError),
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
