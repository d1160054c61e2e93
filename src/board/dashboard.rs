//! Immutable interaction state for the project dashboard.
//!
//! Every transition consumes the state and returns the next one, so the
//! presentation layer always renders from a single value.

use super::BoardError;
use crate::project::domain::{ProjectCriteria, ProjectId, ProjectWithTasks, arrange};
use crate::task::domain::TaskId;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

/// Number of characters shown before a description is collapsed.
pub const EXCERPT_LIMIT: usize = 100;

const ELLIPSIS: &str = "...";

/// Entity awaiting delete confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeletionTarget {
    /// A project and its tasks.
    Project(ProjectId),
    /// A single task.
    Task(TaskId),
}

impl fmt::Display for DeletionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project(id) => write!(f, "project {id}"),
            Self::Task(id) => write!(f, "task {id}"),
        }
    }
}

/// Description text prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionExcerpt<'a> {
    text: Cow<'a, str>,
    truncated: bool,
}

impl DescriptionExcerpt<'_> {
    /// Returns the text to render.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` when a "see more" toggle should be offered.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// Collapses descriptions longer than [`EXCERPT_LIMIT`] characters.
///
/// Expanded descriptions are returned whole.
#[must_use]
pub fn excerpt(description: &str, expanded: bool) -> DescriptionExcerpt<'_> {
    let too_long = description.chars().nth(EXCERPT_LIMIT).is_some();
    if too_long && !expanded {
        let mut text: String = description.chars().take(EXCERPT_LIMIT).collect();
        text.push_str(ELLIPSIS);
        return DescriptionExcerpt {
            text: Cow::Owned(text),
            truncated: true,
        };
    }
    DescriptionExcerpt {
        text: Cow::Borrowed(description),
        truncated: false,
    }
}

/// Everything the dashboard needs to render besides the fetched data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    criteria: ProjectCriteria,
    expanded: BTreeSet<TaskId>,
    add_task_target: Option<ProjectId>,
    pending_deletion: Option<DeletionTarget>,
    error: Option<String>,
}

impl DashboardState {
    /// Creates the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the active board criteria.
    #[must_use]
    pub const fn criteria(&self) -> &ProjectCriteria {
        &self.criteria
    }

    /// Replaces the board criteria.
    #[must_use]
    pub fn with_criteria(self, criteria: ProjectCriteria) -> Self {
        Self { criteria, ..self }
    }

    /// Applies the active criteria to freshly fetched projects.
    #[must_use]
    pub fn visible_projects(&self, projects: &[ProjectWithTasks]) -> Vec<ProjectWithTasks> {
        arrange(projects, &self.criteria)
    }

    /// Flips the "see more" flag of a task description.
    #[must_use]
    pub fn toggle_expanded(mut self, task_id: TaskId) -> Self {
        if !self.expanded.remove(&task_id) {
            self.expanded.insert(task_id);
        }
        self
    }

    /// Returns `true` when the task description is shown in full.
    #[must_use]
    pub fn is_expanded(&self, task_id: TaskId) -> bool {
        self.expanded.contains(&task_id)
    }

    /// Prepares a task description according to its expanded flag.
    #[must_use]
    pub fn description<'a>(&self, task_id: TaskId, description: &'a str) -> DescriptionExcerpt<'a> {
        excerpt(description, self.is_expanded(task_id))
    }

    /// Returns the project the add-task dialog is open for.
    #[must_use]
    pub const fn add_task_target(&self) -> Option<ProjectId> {
        self.add_task_target
    }

    /// Opens the add-task dialog for a project.
    #[must_use]
    pub fn open_add_task(self, project_id: ProjectId) -> Self {
        Self {
            add_task_target: Some(project_id),
            ..self
        }
    }

    /// Closes the add-task dialog.
    #[must_use]
    pub fn close_add_task(self) -> Self {
        Self {
            add_task_target: None,
            ..self
        }
    }

    /// Returns the entity awaiting delete confirmation.
    #[must_use]
    pub const fn pending_deletion(&self) -> Option<DeletionTarget> {
        self.pending_deletion
    }

    /// Opens the delete confirmation dialog.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DeletionPending`] while another confirmation is
    /// open; only one destructive action is offered at a time.
    pub fn request_deletion(self, target: DeletionTarget) -> Result<Self, BoardError> {
        if let Some(open) = self.pending_deletion {
            return Err(BoardError::DeletionPending(open));
        }
        Ok(Self {
            pending_deletion: Some(target),
            ..self
        })
    }

    /// Closes the delete confirmation dialog without deleting.
    #[must_use]
    pub fn cancel_deletion(self) -> Self {
        Self {
            pending_deletion: None,
            ..self
        }
    }

    /// Confirms the pending deletion, returning the entity to delete.
    #[must_use]
    pub fn confirm_deletion(self) -> (Self, Option<DeletionTarget>) {
        let target = self.pending_deletion;
        (
            Self {
                pending_deletion: None,
                ..self
            },
            target,
        )
    }

    /// Returns the error message on display, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Records a failed action for display.
    #[must_use]
    pub fn with_error(self, message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..self
        }
    }

    /// Dismisses the error message.
    #[must_use]
    pub fn clear_error(self) -> Self {
        Self { error: None, ..self }
    }
}
