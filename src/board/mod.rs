//! Client-side state for the project dashboard and task board.
//!
//! These types hold no infrastructure. They model what the presentation
//! layer shows between server round trips: tasks grouped into status
//! columns, optimistic status changes with compensation on failure, and the
//! dashboard's dialogs, filters and expanded descriptions as one immutable
//! value.

mod dashboard;
mod kanban;

pub use dashboard::{DashboardState, DeletionTarget, DescriptionExcerpt, EXCERPT_LIMIT, excerpt};
pub use kanban::{
    KanbanBoard, PendingStatusChange, StatusChangeOutcome, StatusColumn, StatusUpdater,
};

use crate::task::domain::TaskId;
use thiserror::Error;

/// Errors returned by board state transitions.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BoardError {
    /// The task is not shown on the board.
    #[error("task {0} is not on the board")]
    UnknownTask(TaskId),

    /// Another delete confirmation is already open.
    #[error("a delete confirmation is already open for {0}")]
    DeletionPending(DeletionTarget),
}

#[cfg(test)]
mod tests;
