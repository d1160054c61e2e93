//! When steps for project board BDD scenarios.

use super::world::ProjectBoardWorld;
use rstest_bdd_macros::when;
use taskboard::project::domain::{ProjectStatus, SortDirection};

#[when(r#"the board is filtered by status "{status}""#)]
fn filter_by_status(world: &mut ProjectBoardWorld, status: String) -> Result<(), eyre::Report> {
    let wanted = ProjectStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid project status in scenario: {err}"))?;
    world.criteria = world.criteria.with_status(wanted);
    Ok(())
}

#[when(r#"the board is sorted by task count "{direction}""#)]
fn sort_by_task_count(world: &mut ProjectBoardWorld, direction: String) -> Result<(), eyre::Report> {
    let order = SortDirection::try_from(direction.as_str())
        .map_err(|err| eyre::eyre!("invalid sort direction in scenario: {err}"))?;
    world.criteria = world.criteria.with_task_count(order);
    Ok(())
}

#[when(r#"the board is sorted by due date "{direction}""#)]
fn sort_by_due_date(world: &mut ProjectBoardWorld, direction: String) -> Result<(), eyre::Report> {
    let order = SortDirection::try_from(direction.as_str())
        .map_err(|err| eyre::eyre!("invalid sort direction in scenario: {err}"))?;
    world.criteria = world.criteria.with_due_date(order);
    Ok(())
}
