//! Shared fixtures for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::identity::domain::UserId;
use taskboard::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{Project, ProjectId},
    services::{CreateProjectRequest, ProjectCatalogService},
};
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskStatus},
    services::{CreateTaskRequest, TaskLifecycleService},
};

/// Project catalog over in-memory stores.
pub type Catalog =
    ProjectCatalogService<InMemoryProjectRepository, InMemoryTaskRepository, DefaultClock>;

/// Task lifecycle service over in-memory stores.
pub type Lifecycle =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryProjectRepository, DefaultClock>;

/// Both services sharing one pair of stores.
pub struct Stores {
    /// Project operations.
    pub catalog: Catalog,
    /// Task operations.
    pub lifecycle: Lifecycle,
}

/// Provides services over fresh, shared in-memory stores.
#[fixture]
pub fn stores() -> Stores {
    let projects = Arc::new(InMemoryProjectRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let clock = Arc::new(DefaultClock);
    Stores {
        catalog: ProjectCatalogService::new(
            Arc::clone(&projects),
            Arc::clone(&tasks),
            Arc::clone(&clock),
        ),
        lifecycle: TaskLifecycleService::new(tasks, projects, clock),
    }
}

/// Returns the user every helper task is authored by.
///
/// # Panics
///
/// Panics if the literal identifier fails validation.
#[must_use]
pub fn author() -> UserId {
    UserId::new("integration-author").expect("valid user id")
}

impl Stores {
    /// Creates a project named `name`, optionally ending on `end_date`.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog rejects the project.
    pub async fn project(
        &self,
        name: &str,
        end_date: Option<&str>,
    ) -> Result<Project, eyre::Report> {
        let mut request = CreateProjectRequest::new(name);
        if let Some(end) = end_date {
            request = request.with_end_date(end);
        }
        Ok(self.catalog.create_project(request).await?)
    }

    /// Adds one task per status to `project_id`.
    ///
    /// # Errors
    ///
    /// Returns an error when any task cannot be created.
    pub async fn tasks(
        &self,
        project_id: ProjectId,
        statuses: &[TaskStatus],
    ) -> Result<Vec<Task>, eyre::Report> {
        let mut created = Vec::with_capacity(statuses.len());
        for (index, status) in statuses.iter().enumerate() {
            let request = CreateTaskRequest::new(project_id, format!("task {index}"), author())
                .with_status(*status);
            created.push(self.lifecycle.create_task(request).await?);
        }
        Ok(created)
    }
}
