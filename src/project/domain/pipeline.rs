//! Filter and sort pipeline over projects with their tasks.
//!
//! The pipeline is a pure function: it never reorders its input and returns
//! a fresh sequence. A status criterion filters; task count and due date are
//! sort keys, with task count taking precedence when both are set.

use super::{ParseSortDirectionError, ProjectStatus, ProjectWithTasks};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Ordering requested for a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest first.
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    /// Largest first.
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortDirection {
    fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl TryFrom<&str> for SortDirection {
    type Error = ParseSortDirectionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(ParseSortDirectionError(value.to_owned())),
        }
    }
}

/// Filter and sort criteria chosen on the project board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCriteria {
    status: Option<ProjectStatus>,
    task_count: Option<SortDirection>,
    due_date: Option<SortDirection>,
}

impl ProjectCriteria {
    /// Creates criteria that keep every project in its original order.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: None,
            task_count: None,
            due_date: None,
        }
    }

    /// Keeps only projects with the given derived status.
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Orders by number of tasks.
    #[must_use]
    pub const fn with_task_count(mut self, direction: SortDirection) -> Self {
        self.task_count = Some(direction);
        self
    }

    /// Orders by project end date.
    #[must_use]
    pub const fn with_due_date(mut self, direction: SortDirection) -> Self {
        self.due_date = Some(direction);
        self
    }

    /// Returns the status filter, if any.
    #[must_use]
    pub const fn status(&self) -> Option<ProjectStatus> {
        self.status
    }

    /// Returns the task-count sort direction, if any.
    #[must_use]
    pub const fn task_count(&self) -> Option<SortDirection> {
        self.task_count
    }

    /// Returns the due-date sort direction, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<SortDirection> {
        self.due_date
    }
}

/// Applies the criteria to a collection of projects.
///
/// Sorting is stable, so projects with equal keys keep their input order.
/// Projects without an end date sort last in either direction.
#[must_use]
pub fn arrange(projects: &[ProjectWithTasks], criteria: &ProjectCriteria) -> Vec<ProjectWithTasks> {
    let mut arranged: Vec<ProjectWithTasks> = projects
        .iter()
        .filter(|entry| criteria.status.is_none_or(|wanted| entry.status() == wanted))
        .cloned()
        .collect();

    if let Some(direction) = criteria.task_count {
        arranged.sort_by(|left, right| {
            direction.orient(left.task_count().cmp(&right.task_count()))
        });
    } else if let Some(direction) = criteria.due_date {
        arranged.sort_by(|left, right| {
            compare_end_dates(left.project().end_date(), right.project().end_date(), direction)
        });
    }
    arranged
}

fn compare_end_dates(
    left: Option<NaiveDate>,
    right: Option<NaiveDate>,
    direction: SortDirection,
) -> Ordering {
    match (left, right) {
        (Some(left_date), Some(right_date)) => direction.orient(left_date.cmp(&right_date)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
