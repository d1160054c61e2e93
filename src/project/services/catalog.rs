//! Service layer for project CRUD and the project board.

use crate::calendar::{parse_iso_date_update, parse_optional_iso_date};
use crate::field_update::FieldUpdate;
use crate::project::{
    domain::{
        Project, ProjectChanges, ProjectCriteria, ProjectDomainError, ProjectDraft, ProjectId,
        ProjectWithTasks, arrange,
    },
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl CreateProjectRequest {
    /// Creates a request with the required name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the start date as an ISO-8601 string.
    #[must_use]
    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    /// Sets the end date as an ISO-8601 string.
    #[must_use]
    pub fn with_end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    fn into_draft(self) -> Result<ProjectDraft, ProjectDomainError> {
        let mut draft = ProjectDraft::new(&self.name)?;
        if let Some(description) = self.description {
            draft = draft.with_description(description);
        }
        if let Some(start_date) = parse_optional_iso_date(self.start_date.as_deref())? {
            draft = draft.with_start_date(start_date);
        }
        if let Some(end_date) = parse_optional_iso_date(self.end_date.as_deref())? {
            draft = draft.with_end_date(end_date);
        }
        Ok(draft)
    }
}

/// Request payload for a partial project update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    name: Option<String>,
    description: FieldUpdate<String>,
    start_date: FieldUpdate<String>,
    end_date: FieldUpdate<String>,
}

impl UpdateProjectRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Changes the description.
    #[must_use]
    pub fn with_description(mut self, description: FieldUpdate<String>) -> Self {
        self.description = description;
        self
    }

    /// Changes the start date, given as an ISO-8601 string.
    #[must_use]
    pub fn with_start_date(mut self, start_date: FieldUpdate<String>) -> Self {
        self.start_date = start_date;
        self
    }

    /// Changes the end date, given as an ISO-8601 string.
    #[must_use]
    pub fn with_end_date(mut self, end_date: FieldUpdate<String>) -> Self {
        self.end_date = end_date;
        self
    }

    fn into_changes(self) -> Result<ProjectChanges, ProjectDomainError> {
        Ok(ProjectChanges {
            name: self.name,
            description: self.description,
            start_date: parse_iso_date_update(self.start_date)?,
            end_date: parse_iso_date_update(self.end_date)?,
        })
    }
}

/// Confirmation returned after a project is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectDeleted {
    /// Identifier of the removed project.
    pub project_id: ProjectId,
    /// Number of owned tasks removed with it.
    pub removed_tasks: usize,
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectCatalogError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),

    /// The project does not exist.
    #[error("project not found")]
    NotFound(ProjectId),

    /// Project repository operation failed.
    #[error(transparent)]
    Repository(ProjectRepositoryError),

    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),
}

impl From<ProjectRepositoryError> for ProjectCatalogError {
    fn from(err: ProjectRepositoryError) -> Self {
        match err {
            ProjectRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for project catalog operations.
pub type ProjectCatalogResult<T> = Result<T, ProjectCatalogError>;

/// Project orchestration service.
#[derive(Clone)]
pub struct ProjectCatalogService<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<P>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<P, T, C> ProjectCatalogService<P, T, C>
where
    P: ProjectRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project catalog service.
    #[must_use]
    pub const fn new(repository: Arc<P>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            repository,
            tasks,
            clock,
        }
    }

    /// Lists every project with its tasks, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError`] when either repository fails.
    pub async fn list_projects(&self) -> ProjectCatalogResult<Vec<ProjectWithTasks>> {
        let projects = self.repository.list_all().await?;
        let mut listed = Vec::with_capacity(projects.len());
        for project in projects {
            listed.push(self.with_tasks(project).await?);
        }
        Ok(listed)
    }

    /// Fetches one project with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::NotFound`] when the project does not
    /// exist.
    pub async fn get_project(&self, id: ProjectId) -> ProjectCatalogResult<ProjectWithTasks> {
        let project = self.require(id).await?;
        self.with_tasks(project).await
    }

    /// Creates a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::Domain`] for invalid input and
    /// [`ProjectCatalogError::Repository`] when persistence fails.
    pub async fn create_project(&self, request: CreateProjectRequest) -> ProjectCatalogResult<Project> {
        let project = Project::create(request.into_draft()?, &*self.clock)?;
        self.repository.store(&project).await?;
        tracing::info!(project_id = %project.id(), "project created");
        Ok(project)
    }

    /// Applies a partial update to a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::NotFound`] when the project does not
    /// exist and [`ProjectCatalogError::Domain`] for invalid changes.
    pub async fn update_project(
        &self,
        id: ProjectId,
        request: UpdateProjectRequest,
    ) -> ProjectCatalogResult<Project> {
        let changes = request.into_changes()?;
        let mut project = self.require(id).await?;
        project.apply(changes, &*self.clock)?;
        self.repository.update(&project).await?;
        tracing::info!(project_id = %id, "project updated");
        Ok(project)
    }

    /// Deletes a project together with the tasks it owns.
    ///
    /// The project row goes first, so a failed delete leaves its tasks in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError::NotFound`] when the project does not
    /// exist.
    pub async fn delete_project(&self, id: ProjectId) -> ProjectCatalogResult<ProjectDeleted> {
        if self.repository.find_by_id(id).await?.is_none() {
            tracing::warn!(project_id = %id, "delete requested for missing project");
            return Err(ProjectCatalogError::NotFound(id));
        }
        let removed_tasks = self.tasks.find_by_project(id).await?.len();
        self.repository.delete(id).await?;
        // Storage without a cascading foreign key still holds the tasks.
        self.tasks.delete_by_project(id).await?;
        tracing::info!(project_id = %id, removed_tasks, "project deleted");
        Ok(ProjectDeleted {
            project_id: id,
            removed_tasks,
        })
    }

    /// Lists projects filtered and ordered by board criteria.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectCatalogError`] when either repository fails.
    pub async fn board(
        &self,
        criteria: &ProjectCriteria,
    ) -> ProjectCatalogResult<Vec<ProjectWithTasks>> {
        let projects = self.list_projects().await?;
        Ok(arrange(&projects, criteria))
    }

    async fn require(&self, id: ProjectId) -> ProjectCatalogResult<Project> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProjectCatalogError::NotFound(id))
    }

    async fn with_tasks(&self, project: Project) -> ProjectCatalogResult<ProjectWithTasks> {
        let tasks = self.tasks.find_by_project(project.id()).await?;
        Ok(ProjectWithTasks::new(project, tasks))
    }
}
