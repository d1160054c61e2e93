//! Then steps for optimistic status change BDD scenarios.

use super::world::{KanbanWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskboard::board::StatusChangeOutcome;
use taskboard::task::domain::TaskStatus;

fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid task status in scenario: {err}"))
}

fn outcome(world: &KanbanWorld) -> Result<&StatusChangeOutcome, eyre::Report> {
    world
        .outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing outcome in scenario world"))
}

#[then("the change is confirmed")]
fn change_is_confirmed(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let result = outcome(world)?;
    eyre::ensure!(result.is_confirmed(), "expected confirmation, got {result:?}");
    Ok(())
}

#[then(r#"the change is reverted with message "{message}""#)]
fn change_is_reverted(world: &KanbanWorld, message: String) -> Result<(), eyre::Report> {
    match outcome(world)? {
        StatusChangeOutcome::Reverted { message: actual, .. } if *actual == message => Ok(()),
        other => Err(eyre::eyre!("expected revert with {message:?}, got {other:?}")),
    }
}

#[then("the first change is superseded")]
fn first_change_is_superseded(world: &KanbanWorld) -> Result<(), eyre::Report> {
    let result = outcome(world)?;
    eyre::ensure!(
        matches!(result, StatusChangeOutcome::Superseded { .. }),
        "expected superseded outcome, got {result:?}"
    );
    Ok(())
}

#[then(r#"the board shows the task in "{status}""#)]
fn board_shows_task_in(world: &KanbanWorld, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let task_id = world
        .task_id
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let shown = world
        .board
        .as_ref()
        .and_then(|board| board.task(task_id))
        .map(|task| task.status())
        .ok_or_else(|| eyre::eyre!("task missing from board"))?;
    eyre::ensure!(shown == expected, "expected {expected}, board shows {shown}");
    Ok(())
}

#[then(r#"the stored task is in "{status}""#)]
fn stored_task_is_in(world: &KanbanWorld, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let task_id = world
        .task_id
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let stored = run_async(world.lifecycle.find_by_id(task_id))
        .wrap_err("load stored task")?
        .ok_or_else(|| eyre::eyre!("stored task missing"))?;
    eyre::ensure!(
        stored.status() == expected,
        "expected {expected}, store holds {}",
        stored.status()
    );
    Ok(())
}
