//! Shared world state for optimistic status change BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::board::{KanbanBoard, PendingStatusChange, StatusChangeOutcome};
use taskboard::project::adapters::memory::InMemoryProjectRepository;
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository, domain::TaskId, services::TaskLifecycleService,
};

/// Task service type used by the BDD world.
pub type TestLifecycle =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryProjectRepository, DefaultClock>;

/// Scenario world for optimistic status change behaviour tests.
pub struct KanbanWorld {
    pub projects: Arc<InMemoryProjectRepository>,
    pub lifecycle: TestLifecycle,
    pub board: Option<KanbanBoard>,
    pub task_id: Option<TaskId>,
    pub pending: Vec<PendingStatusChange>,
    pub outcome: Option<StatusChangeOutcome>,
}

impl KanbanWorld {
    /// Creates a world over empty in-memory stores.
    #[must_use]
    pub fn new() -> Self {
        let projects = Arc::new(InMemoryProjectRepository::new());
        let lifecycle = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::clone(&projects),
            Arc::new(DefaultClock),
        );
        Self {
            projects,
            lifecycle,
            board: None,
            task_id: None,
            pending: Vec::new(),
            outcome: None,
        }
    }

    /// Returns the board together with the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no board has been set up.
    pub fn board_and_task(&mut self) -> Result<(&mut KanbanBoard, TaskId), eyre::Report> {
        let task_id = self
            .task_id
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
        let board = self
            .board
            .as_mut()
            .ok_or_else(|| eyre::eyre!("missing board in scenario world"))?;
        Ok((board, task_id))
    }
}

impl Default for KanbanWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> KanbanWorld {
    KanbanWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
