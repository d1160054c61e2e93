//! Kanban view of a project's tasks with optimistic status changes.
//!
//! A status change is applied locally first and reconciled once the server
//! answers. A failed change is compensated by restoring the previous status,
//! unless a later change has already replaced the tentative value.

use super::BoardError;
use crate::project::{domain::ProjectId, ports::ProjectRepository};
use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::TaskRepository,
    services::{TaskLifecycleError, TaskLifecycleService},
};
use async_trait::async_trait;
use mockable::Clock;

/// One board column holding the tasks in a single status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusColumn<'a> {
    status: TaskStatus,
    tasks: Vec<&'a Task>,
}

impl<'a> StatusColumn<'a> {
    /// Returns the column status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the column heading.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.status.label()
    }

    /// Returns the tasks in this column, in board order.
    #[must_use]
    pub fn tasks(&self) -> &[&'a Task] {
        &self.tasks
    }
}

/// Client-side copy of a project's tasks grouped by status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanbanBoard {
    project_id: ProjectId,
    tasks: Vec<Task>,
}

/// A tentative status change awaiting server confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a pending change must be settled"]
pub struct PendingStatusChange {
    task_id: TaskId,
    previous: TaskStatus,
    requested: TaskStatus,
}

impl PendingStatusChange {
    /// Returns the task being changed.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the status displayed before the change.
    #[must_use]
    pub const fn previous(&self) -> TaskStatus {
        self.previous
    }

    /// Returns the tentatively displayed status.
    #[must_use]
    pub const fn requested(&self) -> TaskStatus {
        self.requested
    }
}

/// How a pending status change was reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChangeOutcome {
    /// The server accepted the change; the board holds the server's task.
    Confirmed(Task),
    /// The server rejected the change; the previous status was restored.
    Reverted {
        /// Task whose status was restored.
        task_id: TaskId,
        /// Status shown again.
        restored: TaskStatus,
        /// Failure reported by the server.
        message: String,
    },
    /// A later change replaced the tentative value; the board was left alone.
    Superseded {
        /// Task whose change was superseded.
        task_id: TaskId,
    },
}

impl StatusChangeOutcome {
    /// Returns `true` when the server accepted the change.
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }
}

impl KanbanBoard {
    /// Creates a board over the tasks of one project.
    #[must_use]
    pub const fn new(project_id: ProjectId, tasks: Vec<Task>) -> Self {
        Self { project_id, tasks }
    }

    /// Returns the project shown on the board.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns every task on the board.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a task by identifier.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// Groups the tasks into one column per status, in board order.
    ///
    /// Every status gets a column, even when it holds no tasks.
    #[must_use]
    pub fn columns(&self) -> Vec<StatusColumn<'_>> {
        TaskStatus::ALL
            .into_iter()
            .map(|status| StatusColumn {
                status,
                tasks: self
                    .tasks
                    .iter()
                    .filter(|task| task.status() == status)
                    .collect(),
            })
            .collect()
    }

    /// Applies a status change locally before the server confirms it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the task is not on the board.
    pub fn begin_status_change(
        &mut self,
        task_id: TaskId,
        requested: TaskStatus,
        clock: &impl Clock,
    ) -> Result<PendingStatusChange, BoardError> {
        let task = self.task_mut(task_id)?;
        let previous = task.set_status(requested, clock);
        Ok(PendingStatusChange {
            task_id,
            previous,
            requested,
        })
    }

    /// Reconciles a pending change with the server's answer.
    ///
    /// The board is only touched while the tentative status is still the one
    /// displayed; otherwise the outcome is [`StatusChangeOutcome::Superseded`].
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the task has left the board.
    pub fn settle<E>(
        &mut self,
        pending: PendingStatusChange,
        answer: Result<Task, E>,
        clock: &impl Clock,
    ) -> Result<StatusChangeOutcome, BoardError>
    where
        E: std::fmt::Display,
    {
        let task = self.task_mut(pending.task_id)?;
        if task.status() != pending.requested {
            return Ok(StatusChangeOutcome::Superseded {
                task_id: pending.task_id,
            });
        }

        match answer {
            Ok(confirmed) => {
                *task = confirmed.clone();
                Ok(StatusChangeOutcome::Confirmed(confirmed))
            }
            Err(err) => {
                task.set_status(pending.previous, clock);
                tracing::warn!(
                    task_id = %pending.task_id,
                    restored = %pending.previous,
                    error = %err,
                    "status change reverted"
                );
                Ok(StatusChangeOutcome::Reverted {
                    task_id: pending.task_id,
                    restored: pending.previous,
                    message: err.to_string(),
                })
            }
        }
    }

    /// Runs a full optimistic status change against the server.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the task is not on the board.
    pub async fn change_status<U>(
        &mut self,
        updater: &U,
        task_id: TaskId,
        requested: TaskStatus,
        clock: &(impl Clock + Sync),
    ) -> Result<StatusChangeOutcome, BoardError>
    where
        U: StatusUpdater + ?Sized,
    {
        let pending = self.begin_status_change(task_id, requested, clock)?;
        let answer = updater.update_status(task_id, requested).await;
        self.settle(pending, answer, clock)
    }

    fn task_mut(&mut self, task_id: TaskId) -> Result<&mut Task, BoardError> {
        self.tasks
            .iter_mut()
            .find(|task| task.id() == task_id)
            .ok_or(BoardError::UnknownTask(task_id))
    }
}

/// Server-side status update used by [`KanbanBoard::change_status`].
#[async_trait]
pub trait StatusUpdater: Send + Sync {
    /// Failure reported when the server rejects the change.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persists a new status and returns the stored task.
    async fn update_status(&self, task_id: TaskId, status: TaskStatus)
    -> Result<Task, Self::Error>;
}

#[async_trait]
impl<R, P, C> StatusUpdater for TaskLifecycleService<R, P, C>
where
    R: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    type Error = TaskLifecycleError;

    async fn update_status(
        &self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> Result<Task, Self::Error> {
        self.set_status(task_id, status).await
    }
}
