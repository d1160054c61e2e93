//! Service layer for task creation, editing, status changes and deletion.

use crate::calendar::{parse_iso_date_update, parse_optional_iso_date};
use crate::field_update::FieldUpdate;
use crate::identity::domain::UserId;
use crate::project::{domain::ProjectId, ports::ProjectRepository};
use crate::task::{
    domain::{Task, TaskChanges, TaskDomainError, TaskDraft, TaskId, TaskPriority, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
///
/// Dates travel as ISO-8601 strings and are parsed by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    author: UserId,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    tags: Option<String>,
    start_date: Option<String>,
    due_date: Option<String>,
    points: Option<i32>,
    assignees: Vec<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>, author: UserId) -> Self {
        Self {
            project_id,
            title: title.into(),
            author,
            description: None,
            status: None,
            priority: None,
            tags: None,
            start_date: None,
            due_date: None,
            points: None,
            assignees: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// Sets the start date as an ISO-8601 string.
    #[must_use]
    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    /// Sets the due date as an ISO-8601 string.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets the story points.
    #[must_use]
    pub const fn with_points(mut self, points: i32) -> Self {
        self.points = Some(points);
        self
    }

    /// Sets the assigned user identifiers.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = String>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    fn into_draft(self) -> Result<TaskDraft, TaskDomainError> {
        let mut draft = TaskDraft::new(self.project_id, &self.title, self.author)?
            .with_assignees(parse_user_ids(self.assignees)?);
        if let Some(description) = self.description {
            draft = draft.with_description(description);
        }
        if let Some(status) = self.status {
            draft = draft.with_status(status);
        }
        if let Some(priority) = self.priority {
            draft = draft.with_priority(priority);
        }
        if let Some(tags) = self.tags {
            draft = draft.with_tags(tags);
        }
        if let Some(start_date) = parse_optional_iso_date(self.start_date.as_deref())? {
            draft = draft.with_start_date(start_date);
        }
        if let Some(due_date) = parse_optional_iso_date(self.due_date.as_deref())? {
            draft = draft.with_due_date(due_date);
        }
        if let Some(points) = self.points {
            draft = draft.with_points(points);
        }
        Ok(draft)
    }
}

/// Request payload for a partial task update.
///
/// When assignees are provided they replace the whole assignment set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: FieldUpdate<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    tags: FieldUpdate<String>,
    start_date: FieldUpdate<String>,
    due_date: FieldUpdate<String>,
    points: FieldUpdate<i32>,
    assignees: Option<Vec<String>>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Changes the description.
    #[must_use]
    pub fn with_description(mut self, description: FieldUpdate<String>) -> Self {
        self.description = description;
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Changes the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: FieldUpdate<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Changes the start date, given as an ISO-8601 string.
    #[must_use]
    pub fn with_start_date(mut self, start_date: FieldUpdate<String>) -> Self {
        self.start_date = start_date;
        self
    }

    /// Changes the due date, given as an ISO-8601 string.
    #[must_use]
    pub fn with_due_date(mut self, due_date: FieldUpdate<String>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Changes the story points.
    #[must_use]
    pub const fn with_points(mut self, points: FieldUpdate<i32>) -> Self {
        self.points = points;
        self
    }

    /// Replaces the assignment set.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = String>) -> Self {
        self.assignees = Some(assignees.into_iter().collect());
        self
    }

    fn into_changes(self) -> Result<TaskChanges, TaskDomainError> {
        Ok(TaskChanges {
            title: self.title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            tags: self.tags,
            start_date: parse_iso_date_update(self.start_date)?,
            due_date: parse_iso_date_update(self.due_date)?,
            points: self.points,
            assignees: self.assignees.map(parse_user_ids).transpose()?,
        })
    }
}

/// Confirmation returned after a task is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskDeleted {
    /// Identifier of the removed task.
    pub task_id: TaskId,
    /// Project that owned the task.
    pub project_id: ProjectId,
}

/// Task operation named in wrapped store failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOperation {
    /// Creating a task.
    Create,
    /// Reading tasks.
    Fetch,
    /// Editing task fields.
    Update,
    /// Changing a task's status.
    UpdateStatus,
    /// Deleting a task.
    Delete,
}

impl fmt::Display for TaskOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "failed to create task",
            Self::Fetch => "failed to fetch tasks",
            Self::Update => "failed to update task",
            Self::UpdateStatus => "failed to update task status",
            Self::Delete => "failed to delete task",
        })
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The task does not exist.
    #[error("task not found")]
    NotFound(TaskId),

    /// The referenced project does not exist.
    #[error("project not found")]
    ProjectNotFound(ProjectId),

    /// The store rejected the operation; the message does not reveal why.
    #[error("{operation}")]
    Operation {
        /// Operation that failed.
        operation: TaskOperation,
        /// Underlying store failure.
        #[source]
        source: TaskRepositoryError,
    },
}

impl TaskLifecycleError {
    fn operation(operation: TaskOperation) -> impl FnOnce(TaskRepositoryError) -> Self {
        move |source| {
            tracing::error!(error = %source, "{operation}");
            Self::Operation { operation, source }
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<R, P, C>
where
    R: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    projects: Arc<P>,
    clock: Arc<C>,
}

impl<R, P, C> TaskLifecycleService<R, P, C>
where
    R: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            repository,
            projects,
            clock,
        }
    }

    /// Creates a task in an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for invalid input,
    /// [`TaskLifecycleError::ProjectNotFound`] when the project does not exist
    /// and [`TaskLifecycleError::Operation`] when the store fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let draft = request.into_draft()?;
        let project_id = draft.project_id();

        let project = self
            .projects
            .find_by_id(project_id)
            .await
            .map_err(TaskRepositoryError::persistence)
            .map_err(TaskLifecycleError::operation(TaskOperation::Create))?;
        if project.is_none() {
            return Err(TaskLifecycleError::ProjectNotFound(project_id));
        }

        let task = Task::create(draft, &*self.clock)?;
        self.repository
            .store(&task)
            .await
            .map_err(TaskLifecycleError::operation(TaskOperation::Create))?;
        tracing::info!(task_id = %task.id(), project_id = %project_id, "task created");
        Ok(task)
    }

    /// Lists the tasks of a project in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Operation`] when the store fails.
    pub async fn list_by_project(&self, project_id: ProjectId) -> TaskLifecycleResult<Vec<Task>> {
        self.repository
            .find_by_project(project_id)
            .await
            .map_err(TaskLifecycleError::operation(TaskOperation::Fetch))
    }

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Operation`] when the store fails.
    pub async fn find_by_id(&self, id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(TaskLifecycleError::operation(TaskOperation::Fetch))
    }

    /// Applies a partial update to a task.
    ///
    /// A missing task surfaces as the generic update failure.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] for invalid input and
    /// [`TaskLifecycleError::Operation`] for any store failure.
    pub async fn update_task(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let changes = request.into_changes()?;
        let mut task = self
            .repository
            .find_by_id(id)
            .await
            .map_err(TaskLifecycleError::operation(TaskOperation::Update))?
            .ok_or(TaskRepositoryError::NotFound(id))
            .map_err(TaskLifecycleError::operation(TaskOperation::Update))?;

        task.apply(changes, &*self.clock)?;
        self.repository
            .update(&task)
            .await
            .map_err(TaskLifecycleError::operation(TaskOperation::Update))?;
        tracing::info!(task_id = %id, "task updated");
        Ok(task)
    }

    /// Replaces the status of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// and [`TaskLifecycleError::Operation`] when the store fails.
    pub async fn set_status(&self, id: TaskId, status: TaskStatus) -> TaskLifecycleResult<Task> {
        let mut task = self
            .repository
            .find_by_id(id)
            .await
            .map_err(TaskLifecycleError::operation(TaskOperation::UpdateStatus))?
            .ok_or(TaskLifecycleError::NotFound(id))?;

        let previous = task.set_status(status, &*self.clock);
        self.repository.update(&task).await.map_err(|err| match err {
            TaskRepositoryError::NotFound(missing) => TaskLifecycleError::NotFound(missing),
            other => TaskLifecycleError::operation(TaskOperation::UpdateStatus)(other),
        })?;
        tracing::info!(task_id = %id, from = %previous, to = %status, "task status changed");
        Ok(task)
    }

    /// Deletes a task after checking that it exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// and [`TaskLifecycleError::Operation`] when the store fails.
    pub async fn delete_task(&self, id: TaskId) -> TaskLifecycleResult<TaskDeleted> {
        let Some(task) = self
            .repository
            .find_by_id(id)
            .await
            .map_err(TaskLifecycleError::operation(TaskOperation::Delete))?
        else {
            tracing::warn!(task_id = %id, "delete requested for missing task");
            return Err(TaskLifecycleError::NotFound(id));
        };

        self.repository.delete(id).await.map_err(|err| match err {
            TaskRepositoryError::NotFound(missing) => TaskLifecycleError::NotFound(missing),
            other => TaskLifecycleError::operation(TaskOperation::Delete)(other),
        })?;
        tracing::info!(task_id = %id, "task deleted");
        Ok(TaskDeleted {
            task_id: id,
            project_id: task.project_id(),
        })
    }
}

fn parse_user_ids(raw: Vec<String>) -> Result<BTreeSet<UserId>, TaskDomainError> {
    raw.into_iter()
        .map(|value| UserId::new(value).map_err(TaskDomainError::from))
        .collect()
}
