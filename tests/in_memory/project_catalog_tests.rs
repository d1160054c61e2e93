//! In-memory integration tests for project catalog operations.

use super::helpers::{Stores, stores};
use rstest::rstest;
use taskboard::field_update::FieldUpdate;
use taskboard::project::{
    domain::{ProjectDomainError, ProjectStatus},
    services::{CreateProjectRequest, ProjectCatalogError, UpdateProjectRequest},
};
use taskboard::task::domain::TaskStatus;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_nests_tasks_and_derives_each_status(stores: Stores) -> Result<(), eyre::Report> {
    let done = stores.project("Done", None).await?;
    stores
        .tasks(done.id(), &[TaskStatus::Completed, TaskStatus::Completed])
        .await?;
    let busy = stores.project("Busy", None).await?;
    stores
        .tasks(busy.id(), &[TaskStatus::Completed, TaskStatus::InReview])
        .await?;
    stores.project("Idle", None).await?;

    let listed = stores.catalog.list_projects().await?;
    let summary: Vec<(&str, usize, ProjectStatus)> = listed
        .iter()
        .map(|entry| (entry.project().name(), entry.task_count(), entry.status()))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("Done", 2, ProjectStatus::Completed),
            ("Busy", 2, ProjectStatus::InProgress),
            ("Idle", 0, ProjectStatus::NoTasks),
        ]
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn end_before_start_is_rejected(stores: Stores) {
    let result = stores
        .catalog
        .create_project(
            CreateProjectRequest::new("Backwards")
                .with_start_date("2025-06-01")
                .with_end_date("2025-05-01"),
        )
        .await;

    assert!(matches!(
        result,
        Err(ProjectCatalogError::Domain(ProjectDomainError::EndBeforeStart { .. }))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn null_clears_and_absent_keeps_optional_fields(stores: Stores) -> Result<(), eyre::Report> {
    let project = stores
        .catalog
        .create_project(
            CreateProjectRequest::new("Fields")
                .with_description("keep me")
                .with_end_date("2025-12-31"),
        )
        .await?;

    let updated = stores
        .catalog
        .update_project(
            project.id(),
            UpdateProjectRequest::new().with_end_date(FieldUpdate::Clear),
        )
        .await?;

    assert_eq!(updated.description(), Some("keep me"));
    assert_eq!(updated.end_date(), None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_project_leaves_other_projects_tasks(stores: Stores) -> Result<(), eyre::Report> {
    let doomed = stores.project("Doomed", None).await?;
    stores
        .tasks(doomed.id(), &[TaskStatus::ToDo, TaskStatus::ToDo, TaskStatus::ToDo])
        .await?;
    let kept = stores.project("Kept", None).await?;
    let kept_tasks = stores.tasks(kept.id(), &[TaskStatus::InProgress]).await?;

    let deleted = stores.catalog.delete_project(doomed.id()).await?;
    let remaining = stores.lifecycle.list_by_project(kept.id()).await?;

    assert_eq!(deleted.removed_tasks, 3);
    assert_eq!(remaining, kept_tasks);
    assert!(matches!(
        stores.catalog.get_project(doomed.id()).await,
        Err(ProjectCatalogError::NotFound(_))
    ));
    Ok(())
}
