//! JSON request and response bodies.
//!
//! Field names are camelCase on the wire and dates are ISO-8601 strings.

use crate::calendar::format_iso_date;
use crate::field_update::FieldUpdate;
use crate::identity::domain::{User, UserId};
use crate::project::{
    domain::{Project, ProjectId, ProjectStatus, ProjectWithTasks},
    services::{CreateProjectRequest, ProjectDeleted, UpdateProjectRequest},
};
use crate::task::{
    domain::{Task, TaskId, TaskPriority, TaskStatus},
    services::{CreateTaskRequest, TaskDeleted, UpdateTaskRequest},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/users`.
#[derive(Debug, Deserialize)]
pub struct SignUpBody {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Avatar URL.
    #[serde(default)]
    pub image: Option<String>,
}

/// Public view of a user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User identifier.
    pub id: String,
    /// Display name.
    pub name: Option<String>,
    /// Login email.
    pub email: String,
    /// Avatar URL.
    pub image: Option<String>,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().map(str::to_owned),
            email: user.email().to_string(),
            image: user.image().map(str::to_owned),
            created_at: user.created_at(),
        }
    }
}

/// Body of `POST /api/projects`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectBody {
    /// Project name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Start date.
    #[serde(default)]
    pub start_date: Option<String>,
    /// End date.
    #[serde(default)]
    pub end_date: Option<String>,
}

impl From<CreateProjectBody> for CreateProjectRequest {
    fn from(body: CreateProjectBody) -> Self {
        let mut request = Self::new(body.name);
        if let Some(description) = body.description {
            request = request.with_description(description);
        }
        if let Some(start_date) = body.start_date {
            request = request.with_start_date(start_date);
        }
        if let Some(end_date) = body.end_date {
            request = request.with_end_date(end_date);
        }
        request
    }
}

/// Body of `PATCH /api/projects/{id}`.
///
/// Absent keys are left untouched and `null` clears optional fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectBody {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// Description change.
    #[serde(default)]
    pub description: FieldUpdate<String>,
    /// Start date change.
    #[serde(default)]
    pub start_date: FieldUpdate<String>,
    /// End date change.
    #[serde(default)]
    pub end_date: FieldUpdate<String>,
}

impl From<UpdateProjectBody> for UpdateProjectRequest {
    fn from(body: UpdateProjectBody) -> Self {
        let mut request = Self::new()
            .with_description(body.description)
            .with_start_date(body.start_date)
            .with_end_date(body.end_date);
        if let Some(name) = body.name {
            request = request.with_name(name);
        }
        request
    }
}

/// Public view of a project without its tasks.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    /// Project identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Start date.
    pub start_date: Option<String>,
    /// End date.
    pub end_date: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<&Project> for ProjectResponse {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id(),
            name: project.name().to_owned(),
            description: project.description().map(str::to_owned),
            start_date: project.start_date().map(format_iso_date),
            end_date: project.end_date().map(format_iso_date),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }
}

/// Public view of a project with its tasks and derived status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverviewResponse {
    /// Project fields.
    #[serde(flatten)]
    pub project: ProjectResponse,
    /// Status derived from the tasks.
    pub status: ProjectStatus,
    /// Number of tasks.
    pub task_count: usize,
    /// Owned tasks.
    pub tasks: Vec<TaskResponse>,
}

impl From<&ProjectWithTasks> for ProjectOverviewResponse {
    fn from(entry: &ProjectWithTasks) -> Self {
        Self {
            project: ProjectResponse::from(entry.project()),
            status: entry.status(),
            task_count: entry.task_count(),
            tasks: entry.tasks().iter().map(TaskResponse::from).collect(),
        }
    }
}

/// Confirmation returned by `DELETE /api/projects/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDeletedResponse {
    /// Human-readable confirmation.
    pub message: &'static str,
    /// Removed project.
    pub project_id: ProjectId,
    /// Number of tasks removed with it.
    pub removed_tasks: usize,
}

impl From<ProjectDeleted> for ProjectDeletedResponse {
    fn from(deleted: ProjectDeleted) -> Self {
        Self {
            message: "Project deleted successfully",
            project_id: deleted.project_id,
            removed_tasks: deleted.removed_tasks,
        }
    }
}

/// Body of `POST /api/projects/{id}/tasks`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    /// Task title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Initial status.
    #[serde(default)]
    pub status: Option<TaskStatus>,
    /// Priority.
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Option<String>,
    /// Start date.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Due date.
    #[serde(default)]
    pub due_date: Option<String>,
    /// Story points.
    #[serde(default)]
    pub points: Option<i32>,
    /// Assigned users; absent means none.
    #[serde(default)]
    pub assigned_user_ids: Vec<String>,
}

impl CreateTaskBody {
    /// Builds the service request for `project_id`, authored by `author`.
    #[must_use]
    pub fn into_request(self, project_id: ProjectId, author: UserId) -> CreateTaskRequest {
        let mut request = CreateTaskRequest::new(project_id, self.title, author)
            .with_assignees(self.assigned_user_ids);
        if let Some(description) = self.description {
            request = request.with_description(description);
        }
        if let Some(status) = self.status {
            request = request.with_status(status);
        }
        if let Some(priority) = self.priority {
            request = request.with_priority(priority);
        }
        if let Some(tags) = self.tags {
            request = request.with_tags(tags);
        }
        if let Some(start_date) = self.start_date {
            request = request.with_start_date(start_date);
        }
        if let Some(due_date) = self.due_date {
            request = request.with_due_date(due_date);
        }
        if let Some(points) = self.points {
            request = request.with_points(points);
        }
        request
    }
}

/// Body of `PATCH /api/tasks/{id}`.
///
/// Absent keys are left untouched and `null` clears optional fields. When
/// `assignedUserIds` is present it replaces the whole assignment set.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskBody {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// Description change.
    #[serde(default)]
    pub description: FieldUpdate<String>,
    /// New status.
    #[serde(default)]
    pub status: Option<TaskStatus>,
    /// New priority.
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    /// Tags change.
    #[serde(default)]
    pub tags: FieldUpdate<String>,
    /// Start date change.
    #[serde(default)]
    pub start_date: FieldUpdate<String>,
    /// Due date change.
    #[serde(default)]
    pub due_date: FieldUpdate<String>,
    /// Story points change.
    #[serde(default)]
    pub points: FieldUpdate<i32>,
    /// Replacement assignment set.
    #[serde(default)]
    pub assigned_user_ids: Option<Vec<String>>,
}

impl From<UpdateTaskBody> for UpdateTaskRequest {
    fn from(body: UpdateTaskBody) -> Self {
        let mut request = Self::new()
            .with_description(body.description)
            .with_tags(body.tags)
            .with_start_date(body.start_date)
            .with_due_date(body.due_date)
            .with_points(body.points);
        if let Some(title) = body.title {
            request = request.with_title(title);
        }
        if let Some(status) = body.status {
            request = request.with_status(status);
        }
        if let Some(priority) = body.priority {
            request = request.with_priority(priority);
        }
        if let Some(assignees) = body.assigned_user_ids {
            request = request.with_assignees(assignees);
        }
        request
    }
}

/// Body of `PUT /api/tasks/{id}/status`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeBody {
    /// Status to move the task to.
    pub new_status: TaskStatus,
}

/// Public view of a task.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Workflow status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Free-form tags.
    pub tags: Option<String>,
    /// Start date.
    pub start_date: Option<String>,
    /// Due date.
    pub due_date: Option<String>,
    /// Story points.
    pub points: Option<i32>,
    /// Creator.
    pub author_user_id: UserId,
    /// Assigned users, in identifier order.
    pub assigned_user_ids: Vec<UserId>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            project_id: task.project_id(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            status: task.status(),
            priority: task.priority(),
            tags: task.tags().map(str::to_owned),
            start_date: task.start_date().map(format_iso_date),
            due_date: task.due_date().map(format_iso_date),
            points: task.points(),
            author_user_id: task.author().clone(),
            assigned_user_ids: task.assignees().iter().cloned().collect(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// Confirmation returned by `DELETE /api/tasks/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDeletedResponse {
    /// Human-readable confirmation.
    pub message: &'static str,
    /// Removed task.
    pub task_id: TaskId,
    /// Project that owned the task.
    pub project_id: ProjectId,
}

impl From<TaskDeleted> for TaskDeletedResponse {
    fn from(deleted: TaskDeleted) -> Self {
        Self {
            message: "Task deleted successfully",
            task_id: deleted.task_id,
            project_id: deleted.project_id,
        }
    }
}
