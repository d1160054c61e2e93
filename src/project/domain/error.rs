//! Error types for project domain validation and parsing.

use crate::calendar::InvalidDateError;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or changing projects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyName,

    /// A date field could not be parsed.
    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),

    /// The end date precedes the start date.
    #[error("project end date {end} precedes start date {start}")]
    EndBeforeStart {
        /// Project start date.
        start: NaiveDate,
        /// Project end date.
        end: NaiveDate,
    },
}

/// Error returned while parsing a derived project status label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(pub String);

/// Error returned while parsing a sort direction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort direction: {0}, expected asc or desc")]
pub struct ParseSortDirectionError(pub String);
