//! Then steps for project board BDD scenarios.

use super::world::{ProjectBoardWorld, run_async, split_list};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskboard::project::domain::ProjectStatus;

#[then(r#"the board shows "{names}""#)]
fn board_shows(world: &ProjectBoardWorld, names: String) -> Result<(), eyre::Report> {
    let board = run_async(world.catalog.board(&world.criteria)).wrap_err("load board")?;
    let shown: Vec<&str> = board.iter().map(|entry| entry.project().name()).collect();
    let expected = split_list(&names);
    eyre::ensure!(
        shown == expected,
        "expected board {expected:?}, found {shown:?}"
    );
    Ok(())
}

#[then(r#"project "{name}" has status "{status}""#)]
fn project_has_status(
    world: &ProjectBoardWorld,
    name: String,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = ProjectStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid project status in scenario: {err}"))?;
    let projects = run_async(world.catalog.list_projects()).wrap_err("list projects")?;
    let project = projects
        .iter()
        .find(|entry| entry.project().name() == name)
        .ok_or_else(|| eyre::eyre!("project {name} not found"))?;
    eyre::ensure!(
        project.status() == expected,
        "expected {name} to be {expected}, found {}",
        project.status()
    );
    Ok(())
}
