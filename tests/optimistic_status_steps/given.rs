//! Given steps for optimistic status change BDD scenarios.

use super::world::{KanbanWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use taskboard::board::KanbanBoard;
use taskboard::identity::domain::UserId;
use taskboard::project::{
    domain::{Project, ProjectDraft},
    ports::ProjectRepository,
};
use taskboard::task::{domain::TaskStatus, services::CreateTaskRequest};

#[given(r#"a board with a task in "{status}""#)]
fn board_with_task(world: &mut KanbanWorld, status: String) -> Result<(), eyre::Report> {
    let initial = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid task status in scenario: {err}"))?;
    let project = Project::create(ProjectDraft::new("Kanban")?, &DefaultClock)?;
    run_async(world.projects.store(&project)).wrap_err("store scenario project")?;

    let request = CreateTaskRequest::new(project.id(), "Card", UserId::new("scenario-author")?)
        .with_status(initial);
    let task = run_async(world.lifecycle.create_task(request)).wrap_err("create scenario task")?;

    world.task_id = Some(task.id());
    world.board = Some(KanbanBoard::new(project.id(), vec![task]));
    Ok(())
}

#[given("the task has been deleted on the server")]
fn task_deleted_on_server(world: &mut KanbanWorld) -> Result<(), eyre::Report> {
    let task_id = world
        .task_id
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    run_async(world.lifecycle.delete_task(task_id)).wrap_err("delete scenario task")?;
    Ok(())
}
