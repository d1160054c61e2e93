//! Application services for project orchestration.

mod catalog;

pub use catalog::{
    CreateProjectRequest, ProjectCatalogError, ProjectCatalogResult, ProjectCatalogService,
    ProjectDeleted, UpdateProjectRequest,
};
