//! Row types for the `tasks` and `task_assignees` tables.
//!
//! Status and priority are stored in their wire form (`IN_PROGRESS`,
//! `URGENT`), which the schema's CHECK constraints enforce.

use super::schema::{task_assignees, tasks};
use crate::task::domain::Task;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub tags: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub points: Option<i32>,
    pub author_user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().uuid(),
            project_id: task.project_id().uuid(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            status: task.status().as_str().to_owned(),
            priority: task.priority().as_str().to_owned(),
            tags: task.tags().map(str::to_owned),
            start_date: task.start_date(),
            due_date: task.due_date(),
            points: task.points(),
            author_user_id: task.author().as_str().to_owned(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// Every mutable column; `None` is written as `NULL` so cleared fields stick.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub tags: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub points: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskChangeset {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            status: task.status().as_str().to_owned(),
            priority: task.priority().as_str().to_owned(),
            tags: task.tags().map(str::to_owned),
            start_date: task.start_date(),
            due_date: task.due_date(),
            points: task.points(),
            updated_at: task.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_assignees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AssigneeRow {
    pub task_id: Uuid,
    pub user_id: String,
}

/// One link row per assignee of `task`.
#[must_use]
pub fn assignee_rows(task: &Task) -> Vec<AssigneeRow> {
    let task_id = task.id().uuid();
    task.assignees()
        .iter()
        .map(|user_id| AssigneeRow {
            task_id,
            user_id: user_id.as_str().to_owned(),
        })
        .collect()
}
