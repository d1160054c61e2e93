//! Domain model for projects.
//!
//! Projects own tasks but never store a status: the display status is
//! derived from the owned tasks on every read, and the board pipeline in
//! [`arrange`] filters and orders projects by that derived view.

mod error;
mod ids;
mod overview;
mod pipeline;
mod project;
mod status;

pub use error::{ParseProjectStatusError, ParseSortDirectionError, ProjectDomainError};
pub use ids::ProjectId;
pub use overview::ProjectWithTasks;
pub use pipeline::{ProjectCriteria, SortDirection, arrange};
pub use project::{PersistedProjectData, Project, ProjectChanges, ProjectDraft};
pub use status::ProjectStatus;
