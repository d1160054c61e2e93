//! Behaviour tests for the project board status, filter and sort pipeline.

#[path = "project_board_steps/mod.rs"]
mod project_board_steps_defs;

use project_board_steps_defs::world::{ProjectBoardWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/project_board.feature",
    name = "Derived status reflects task completion"
)]
#[tokio::test(flavor = "multi_thread")]
async fn derived_status_reflects_task_completion(world: ProjectBoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/project_board.feature",
    name = "Filter by completed status"
)]
#[tokio::test(flavor = "multi_thread")]
async fn filter_by_completed_status(world: ProjectBoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/project_board.feature",
    name = "Sort by task count ascending"
)]
#[tokio::test(flavor = "multi_thread")]
async fn sort_by_task_count_ascending(world: ProjectBoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/project_board.feature",
    name = "Sort by task count descending"
)]
#[tokio::test(flavor = "multi_thread")]
async fn sort_by_task_count_descending(world: ProjectBoardWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/project_board.feature",
    name = "Projects without an end date sort last"
)]
#[tokio::test(flavor = "multi_thread")]
async fn projects_without_end_date_sort_last(world: ProjectBoardWorld) {
    let _ = world;
}
