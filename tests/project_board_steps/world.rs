//! Shared world state for project board BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::project::{
    adapters::memory::InMemoryProjectRepository, domain::ProjectCriteria,
    services::ProjectCatalogService,
};
use taskboard::task::{adapters::memory::InMemoryTaskRepository, services::TaskLifecycleService};

/// Catalog type used by the BDD world.
pub type TestCatalog =
    ProjectCatalogService<InMemoryProjectRepository, InMemoryTaskRepository, DefaultClock>;

/// Task service type used by the BDD world.
pub type TestLifecycle =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryProjectRepository, DefaultClock>;

/// Scenario world for project board behaviour tests.
pub struct ProjectBoardWorld {
    pub catalog: TestCatalog,
    pub lifecycle: TestLifecycle,
    pub criteria: ProjectCriteria,
}

impl ProjectBoardWorld {
    /// Creates a world over empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let projects = Arc::new(InMemoryProjectRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let clock = Arc::new(DefaultClock);
        Self {
            catalog: ProjectCatalogService::new(
                Arc::clone(&projects),
                Arc::clone(&tasks),
                Arc::clone(&clock),
            ),
            lifecycle: TaskLifecycleService::new(tasks, projects, clock),
            criteria: ProjectCriteria::new(),
        }
    }
}

impl Default for ProjectBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ProjectBoardWorld {
    ProjectBoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated scenario list, ignoring blanks.
#[must_use]
pub fn split_list(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}
