//! Given steps for project board BDD scenarios.

use super::world::{ProjectBoardWorld, run_async, split_list};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::identity::domain::UserId;
use taskboard::project::{domain::Project, services::CreateProjectRequest};
use taskboard::task::{domain::TaskStatus, services::CreateTaskRequest};

fn create_project(
    world: &ProjectBoardWorld,
    request: CreateProjectRequest,
) -> Result<Project, eyre::Report> {
    run_async(world.catalog.create_project(request)).wrap_err("create project for board scenario")
}

#[given(r#"a project "{name}" with tasks "{statuses}""#)]
fn project_with_tasks(
    world: &mut ProjectBoardWorld,
    name: String,
    statuses: String,
) -> Result<(), eyre::Report> {
    let project = create_project(world, CreateProjectRequest::new(name))?;
    let author = UserId::new("scenario-author")?;
    for raw in split_list(&statuses) {
        let status = TaskStatus::try_from(raw)
            .map_err(|err| eyre::eyre!("invalid task status in scenario: {err}"))?;
        let request =
            CreateTaskRequest::new(project.id(), "scenario task", author.clone()).with_status(status);
        run_async(world.lifecycle.create_task(request)).wrap_err("create task for board scenario")?;
    }
    Ok(())
}

#[given(r#"a project "{name}" with no tasks"#)]
fn project_without_tasks(world: &mut ProjectBoardWorld, name: String) -> Result<(), eyre::Report> {
    create_project(world, CreateProjectRequest::new(name))?;
    Ok(())
}

#[given(r#"a project "{name}" ending on "{date}""#)]
fn project_ending_on(
    world: &mut ProjectBoardWorld,
    name: String,
    date: String,
) -> Result<(), eyre::Report> {
    create_project(world, CreateProjectRequest::new(name).with_end_date(date))?;
    Ok(())
}

#[given(r#"a project "{name}" without an end date"#)]
fn project_without_end_date(world: &mut ProjectBoardWorld, name: String) -> Result<(), eyre::Report> {
    create_project(world, CreateProjectRequest::new(name))?;
    Ok(())
}
