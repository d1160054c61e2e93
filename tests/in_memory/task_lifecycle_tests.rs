//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Stores, author, stores};
use rstest::rstest;
use taskboard::field_update::FieldUpdate;
use taskboard::task::{
    domain::{TaskDomainError, TaskId, TaskPriority, TaskStatus},
    services::{CreateTaskRequest, TaskLifecycleError, UpdateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn omitted_fields_take_workflow_defaults(stores: Stores) -> Result<(), eyre::Report> {
    let project = stores.project("Defaults", None).await?;
    let task = stores
        .lifecycle
        .create_task(CreateTaskRequest::new(project.id(), "Plain", author()))
        .await?;

    assert_eq!(task.status(), TaskStatus::ToDo);
    assert_eq!(task.priority(), TaskPriority::Low);
    assert_eq!(task.author(), &author());
    assert!(task.assignees().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn negative_points_are_rejected(stores: Stores) -> Result<(), eyre::Report> {
    let project = stores.project("Points", None).await?;
    let result = stores
        .lifecycle
        .create_task(CreateTaskRequest::new(project.id(), "Odd", author()).with_points(-3))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::Domain(TaskDomainError::InvalidPoints(-3)))
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn omitted_assignees_are_kept_on_update(stores: Stores) -> Result<(), eyre::Report> {
    let project = stores.project("Assignees", None).await?;
    let task = stores
        .lifecycle
        .create_task(
            CreateTaskRequest::new(project.id(), "Pair", author())
                .with_assignees(["ana".to_owned(), "ben".to_owned()]),
        )
        .await?;

    let updated = stores
        .lifecycle
        .update_task(
            task.id(),
            UpdateTaskRequest::new()
                .with_priority(TaskPriority::Urgent)
                .with_tags(FieldUpdate::Set("backend".to_owned())),
        )
        .await?;

    assert_eq!(updated.assignees(), task.assignees());
    assert_eq!(updated.priority(), TaskPriority::Urgent);
    assert_eq!(updated.tags(), Some("backend"));
    Ok(())
}

#[rstest]
#[case(TaskStatus::InProgress)]
#[case(TaskStatus::InReview)]
#[case(TaskStatus::Completed)]
#[case(TaskStatus::ToDo)]
#[tokio::test(flavor = "multi_thread")]
async fn any_status_can_follow_any_other(
    stores: Stores,
    #[case] target: TaskStatus,
) -> Result<(), eyre::Report> {
    let project = stores.project("Flat", None).await?;
    let task = stores
        .lifecycle
        .create_task(
            CreateTaskRequest::new(project.id(), "Hop", author())
                .with_status(TaskStatus::Completed),
        )
        .await?;

    let moved = stores.lifecycle.set_status(task.id(), target).await?;

    assert_eq!(moved.status(), target);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_task_errors_stay_distinct(stores: Stores) {
    let missing = TaskId::new();

    let delete = stores.lifecycle.delete_task(missing).await;
    let update = stores
        .lifecycle
        .update_task(missing, UpdateTaskRequest::new().with_title("x"))
        .await;

    assert_eq!(
        delete.map(|_| ()).map_err(|err| err.to_string()),
        Err("task not found".to_owned())
    );
    assert_eq!(
        update.map(|_| ()).map_err(|err| err.to_string()),
        Err("failed to update task".to_owned())
    );
}
