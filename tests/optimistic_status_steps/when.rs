//! When steps for optimistic status change BDD scenarios.

use super::world::{KanbanWorld, run_async};
use mockable::DefaultClock;
use rstest_bdd_macros::when;
use taskboard::task::domain::{Task, TaskStatus};

fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid task status in scenario: {err}"))
}

#[when(r#"the task is moved to "{status}""#)]
fn move_task(world: &mut KanbanWorld, status: String) -> Result<(), eyre::Report> {
    let requested = parse_status(&status)?;
    let KanbanWorld {
        lifecycle,
        board: board_slot,
        task_id: task_slot,
        outcome,
        ..
    } = world;
    let task_id = task_slot.ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let board = board_slot
        .as_mut()
        .ok_or_else(|| eyre::eyre!("missing board in scenario world"))?;
    *outcome = Some(run_async(board.change_status(
        &*lifecycle,
        task_id,
        requested,
        &DefaultClock,
    ))?);
    Ok(())
}

#[when(r#"the task is tentatively moved to "{status}""#)]
fn move_task_tentatively(world: &mut KanbanWorld, status: String) -> Result<(), eyre::Report> {
    let requested = parse_status(&status)?;
    let (board, task_id) = world.board_and_task()?;
    let pending = board.begin_status_change(task_id, requested, &DefaultClock)?;
    world.pending.push(pending);
    Ok(())
}

#[when("the server rejects the first change")]
fn server_rejects_first_change(world: &mut KanbanWorld) -> Result<(), eyre::Report> {
    let first = *world
        .pending
        .first()
        .ok_or_else(|| eyre::eyre!("no pending change in scenario world"))?;
    let (board, _) = world.board_and_task()?;
    let outcome = board.settle(first, Err::<Task, _>("connection lost"), &DefaultClock)?;
    world.outcome = Some(outcome);
    Ok(())
}
