//! Diesel-backed [`TaskRepository`].
//!
//! Each call checks out a pooled connection on the blocking thread pool.
//! Writes touching both tables run in one transaction.

use super::{
    models::{AssigneeRow, TaskChangeset, TaskRow, assignee_rows},
    schema::{task_assignees, tasks},
};
use crate::identity::domain::UserId;
use crate::project::domain::ProjectId;
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// r2d2 pool handed to [`PostgresTaskRepository`].
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Stores tasks in the `tasks` table and assignees in `task_assignees`.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Wraps an existing pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let row = TaskRow::from(task);
        let links = assignee_rows(task);

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                diesel::insert_into(tasks::table)
                    .values(&row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TaskRepositoryError::DuplicateTask(task_id)
                        }
                        _ => TaskRepositoryError::persistence(err),
                    })?;
                insert_assignees(tx, &links)
            })
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = TaskChangeset::from(task);
        let links = assignee_rows(task);

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let updated = diesel::update(tasks::table.find(task_id.uuid()))
                    .set(&changeset)
                    .execute(tx)?;
                if updated == 0 {
                    return Err(TaskRepositoryError::NotFound(task_id));
                }

                diesel::delete(
                    task_assignees::table.filter(task_assignees::task_id.eq(task_id.uuid())),
                )
                .execute(tx)?;
                insert_assignees(tx, &links)
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.uuid())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            let Some(task_row) = row else {
                return Ok(None);
            };
            let mut assignees = load_assignees(connection, &[task_row.id])?;
            let task_assignees = assignees.remove(&task_row.id).unwrap_or_default();
            row_to_task(task_row, task_assignees).map(Some)
        })
        .await
    }

    async fn find_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::project_id.eq(project_id.uuid()))
                .order((tasks::created_at.asc(), tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            let ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
            let mut assignees = load_assignees(connection, &ids)?;

            rows.into_iter()
                .map(|row| {
                    let task_assignees = assignees.remove(&row.id).unwrap_or_default();
                    row_to_task(row, task_assignees)
                })
                .collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                diesel::delete(
                    task_assignees::table.filter(task_assignees::task_id.eq(id.uuid())),
                )
                .execute(tx)?;
                let deleted = diesel::delete(tasks::table.find(id.uuid())).execute(tx)?;
                if deleted == 0 {
                    return Err(TaskRepositoryError::NotFound(id));
                }
                Ok(())
            })
        })
        .await
    }

    async fn delete_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let owned_tasks = tasks::table
                    .filter(tasks::project_id.eq(project_id.uuid()))
                    .select(tasks::id);
                diesel::delete(
                    task_assignees::table.filter(task_assignees::task_id.eq_any(owned_tasks)),
                )
                .execute(tx)?;
                let deleted = diesel::delete(
                    tasks::table.filter(tasks::project_id.eq(project_id.uuid())),
                )
                .execute(tx)?;
                Ok(deleted)
            })
        })
        .await
    }
}

fn insert_assignees(
    connection: &mut PgConnection,
    rows: &[AssigneeRow],
) -> TaskRepositoryResult<()> {
    if rows.is_empty() {
        return Ok(());
    }
    diesel::insert_into(task_assignees::table)
        .values(rows)
        .execute(connection)?;
    Ok(())
}

fn load_assignees(
    connection: &mut PgConnection,
    task_ids: &[Uuid],
) -> TaskRepositoryResult<HashMap<Uuid, BTreeSet<UserId>>> {
    if task_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = task_assignees::table
        .filter(task_assignees::task_id.eq_any(task_ids))
        .select(AssigneeRow::as_select())
        .load::<AssigneeRow>(connection)?;

    let mut grouped: HashMap<Uuid, BTreeSet<UserId>> = HashMap::new();
    for row in rows {
        let user_id = UserId::new(row.user_id).map_err(TaskRepositoryError::persistence)?;
        grouped.entry(row.task_id).or_default().insert(user_id);
    }
    Ok(grouped)
}

fn row_to_task(row: TaskRow, assignees: BTreeSet<UserId>) -> TaskRepositoryResult<Task> {
    let status = TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let author = UserId::new(row.author_user_id).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from(row.id),
        project_id: ProjectId::from(row.project_id),
        title: row.title,
        description: row.description,
        status,
        priority,
        tags: row.tags,
        start_date: row.start_date,
        due_date: row.due_date,
        points: row.points,
        author,
        assignees,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
