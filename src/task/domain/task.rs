//! Task aggregate root and its draft and partial-update companions.

use super::{TaskDomainError, TaskId, TaskPriority, TaskStatus};
use crate::field_update::FieldUpdate;
use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    tags: Option<String>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    points: Option<i32>,
    author: UserId,
    assignees: BTreeSet<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted free-form tags.
    pub tags: Option<String>,
    /// Persisted start date.
    pub start_date: Option<NaiveDate>,
    /// Persisted due date.
    pub due_date: Option<NaiveDate>,
    /// Persisted story points.
    pub points: Option<i32>,
    /// User who created the task.
    pub author: UserId,
    /// Users assigned to the task.
    pub assignees: BTreeSet<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Field values for a task that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    project_id: ProjectId,
    title: String,
    author: UserId,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    tags: Option<String>,
    start_date: Option<NaiveDate>,
    due_date: Option<NaiveDate>,
    points: Option<i32>,
    assignees: BTreeSet<UserId>,
}

impl TaskDraft {
    /// Creates a draft with the required project, title and author.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] if the title is blank.
    pub fn new(project_id: ProjectId, title: &str, author: UserId) -> Result<Self, TaskDomainError> {
        Ok(Self {
            project_id,
            title: normalize_title(title)?,
            author,
            description: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            tags: None,
            start_date: None,
            due_date: None,
            points: None,
            assignees: BTreeSet::new(),
        })
    }

    /// Sets the description; blank descriptions are dropped.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_blank(description.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the free-form tags; blank tags are dropped.
    #[must_use]
    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = non_blank(tags.into());
        self
    }

    /// Sets the start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the story points, validated on [`Task::create`].
    #[must_use]
    pub const fn with_points(mut self, points: i32) -> Self {
        self.points = Some(points);
        self
    }

    /// Sets the assignees. Duplicates collapse.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = UserId>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }
}

/// Partial update applied to an existing task.
///
/// `assignees` replaces the whole assignment set when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// Replacement title.
    pub title: Option<String>,
    /// Description change.
    pub description: FieldUpdate<String>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
    /// Tags change.
    pub tags: FieldUpdate<String>,
    /// Start date change.
    pub start_date: FieldUpdate<NaiveDate>,
    /// Due date change.
    pub due_date: FieldUpdate<NaiveDate>,
    /// Story points change.
    pub points: FieldUpdate<i32>,
    /// Replacement assignment set.
    pub assignees: Option<BTreeSet<UserId>>,
}

impl Task {
    /// Creates a new task from a draft.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPoints`] when the draft carries
    /// negative points and [`TaskDomainError::DueBeforeStart`] when its due
    /// date precedes its start date.
    pub fn create(draft: TaskDraft, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        if let Some(points) = draft.points {
            validate_points(points)?;
        }
        ensure_date_order(draft.start_date, draft.due_date)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            project_id: draft.project_id,
            title: draft.title,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            tags: draft.tags,
            start_date: draft.start_date,
            due_date: draft.due_date,
            points: draft.points,
            author: draft.author,
            assignees: draft.assignees,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            tags: data.tags,
            start_date: data.start_date,
            due_date: data.due_date,
            points: data.points,
            author: data.author,
            assignees: data.assignees,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the free-form tags, if any.
    #[must_use]
    pub fn tags(&self) -> Option<&str> {
        self.tags.as_deref()
    }

    /// Returns the start date, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the story points, if any.
    #[must_use]
    pub const fn points(&self) -> Option<i32> {
        self.points
    }

    /// Returns the author.
    #[must_use]
    pub const fn author(&self) -> &UserId {
        &self.author
    }

    /// Returns the assigned users.
    #[must_use]
    pub const fn assignees(&self) -> &BTreeSet<UserId> {
        &self.assignees
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the status and returns the previous one.
    ///
    /// Every status is reachable from every other status.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) -> TaskStatus {
        let previous = std::mem::replace(&mut self.status, status);
        self.touch(clock);
        previous
    }

    /// Applies a partial update.
    ///
    /// The task is left untouched when validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank replacement title
    /// and [`TaskDomainError::InvalidPoints`] for negative points.
    /// Returns [`TaskDomainError::DueBeforeStart`] when the merged dates are
    /// inverted.
    pub fn apply(&mut self, changes: TaskChanges, clock: &impl Clock) -> Result<(), TaskDomainError> {
        let TaskChanges {
            title,
            description,
            status,
            priority,
            tags,
            start_date,
            due_date,
            points,
            assignees,
        } = changes;

        let next_title = title.as_deref().map(normalize_title).transpose()?;
        if let FieldUpdate::Set(value) = points {
            validate_points(value)?;
        }
        let mut next_start = self.start_date;
        let mut next_due = self.due_date;
        start_date.apply_to(&mut next_start);
        due_date.apply_to(&mut next_due);
        ensure_date_order(next_start, next_due)?;

        if let Some(valid_title) = next_title {
            self.title = valid_title;
        }
        non_blank_update(description).apply_to(&mut self.description);
        if let Some(next_status) = status {
            self.status = next_status;
        }
        if let Some(next_priority) = priority {
            self.priority = next_priority;
        }
        non_blank_update(tags).apply_to(&mut self.tags);
        self.start_date = next_start;
        self.due_date = next_due;
        points.apply_to(&mut self.points);
        if let Some(next_assignees) = assignees {
            self.assignees = next_assignees;
        }
        self.touch(clock);
        Ok(())
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

fn normalize_title(title: &str) -> Result<String, TaskDomainError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

const fn validate_points(points: i32) -> Result<(), TaskDomainError> {
    if points < 0 {
        return Err(TaskDomainError::InvalidPoints(points));
    }
    Ok(())
}

fn ensure_date_order(
    start: Option<NaiveDate>,
    due: Option<NaiveDate>,
) -> Result<(), TaskDomainError> {
    match (start, due) {
        (Some(start_date), Some(due_date)) if due_date < start_date => {
            Err(TaskDomainError::DueBeforeStart {
                start: start_date,
                due: due_date,
            })
        }
        _ => Ok(()),
    }
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn non_blank_update(update: FieldUpdate<String>) -> FieldUpdate<String> {
    match update {
        FieldUpdate::Set(text) => FieldUpdate::from_option(non_blank(text)),
        other => other,
    }
}
