//! Storage contract for tasks and their assignee links.

use crate::project::domain::ProjectId;
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Shorthand for results produced by a [`TaskRepository`].
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Where tasks live between requests.
///
/// A task row and its assignee set are always written together, so an
/// implementation must apply [`store`](Self::store) and
/// [`update`](Self::update) atomically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts `task` and links its assignees.
    ///
    /// # Errors
    ///
    /// [`TaskRepositoryError::DuplicateTask`] if the identifier is taken.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Overwrites a stored task; the assignee set is replaced, not merged.
    ///
    /// # Errors
    ///
    /// [`TaskRepositoryError::NotFound`] if nothing is stored under the id.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Loads one task, or `None`.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Loads every task owned by `project_id`, oldest first.
    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>>;

    /// Removes one task with its assignee links.
    ///
    /// # Errors
    ///
    /// [`TaskRepositoryError::NotFound`] if nothing is stored under the id.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Removes all tasks of a project, returning the count.
    async fn delete_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize>;
}

/// Failure reported by a [`TaskRepository`].
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Insert collided with an existing task.
    #[error("task {0} is already stored")]
    DuplicateTask(TaskId),

    /// No task is stored under the identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The backing store failed or returned an unreadable row.
    #[error("task storage failed: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Boxes a backend error into [`Self::Persistence`].
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
