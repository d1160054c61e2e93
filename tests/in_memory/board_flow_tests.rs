//! End-to-end flows through the board pipeline and the kanban board.

use super::helpers::{Stores, stores};
use mockable::DefaultClock;
use rstest::rstest;
use taskboard::board::{KanbanBoard, StatusChangeOutcome};
use taskboard::project::domain::{ProjectCriteria, SortDirection};
use taskboard::task::domain::TaskStatus;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn due_date_ordering_places_undated_projects_last(
    stores: Stores,
) -> Result<(), eyre::Report> {
    stores.project("Late", Some("2025-12-01")).await?;
    stores.project("Undated", None).await?;
    stores.project("Early", Some("2025-02-01")).await?;

    let ascending = stores
        .catalog
        .board(&ProjectCriteria::new().with_due_date(SortDirection::Ascending))
        .await?;
    let descending = stores
        .catalog
        .board(&ProjectCriteria::new().with_due_date(SortDirection::Descending))
        .await?;
    let names = |entries: &[taskboard::project::domain::ProjectWithTasks]| -> Vec<String> {
        entries
            .iter()
            .map(|entry| entry.project().name().to_owned())
            .collect()
    };

    assert_eq!(names(&ascending), vec!["Early", "Late", "Undated"]);
    assert_eq!(names(&descending), vec!["Late", "Early", "Undated"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn confirmed_change_matches_the_stored_task(stores: Stores) -> Result<(), eyre::Report> {
    let project = stores.project("Kanban", None).await?;
    let tasks = stores.tasks(project.id(), &[TaskStatus::ToDo]).await?;
    let task_id = tasks.first().map(|task| task.id()).ok_or_else(|| eyre::eyre!("no task"))?;
    let mut board = KanbanBoard::new(project.id(), tasks);

    let outcome = board
        .change_status(&stores.lifecycle, task_id, TaskStatus::InReview, &DefaultClock)
        .await?;
    let stored = stores
        .lifecycle
        .find_by_id(task_id)
        .await?
        .ok_or_else(|| eyre::eyre!("task vanished"))?;

    assert_eq!(outcome, StatusChangeOutcome::Confirmed(stored.clone()));
    assert_eq!(board.task(task_id), Some(&stored));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn change_for_a_deleted_task_is_reverted(stores: Stores) -> Result<(), eyre::Report> {
    let project = stores.project("Stale", None).await?;
    let tasks = stores.tasks(project.id(), &[TaskStatus::InProgress]).await?;
    let task_id = tasks.first().map(|task| task.id()).ok_or_else(|| eyre::eyre!("no task"))?;
    let mut board = KanbanBoard::new(project.id(), tasks);
    stores.lifecycle.delete_task(task_id).await?;

    let outcome = board
        .change_status(&stores.lifecycle, task_id, TaskStatus::Completed, &DefaultClock)
        .await?;

    assert!(!outcome.is_confirmed());
    assert_eq!(
        board.task(task_id).map(|task| task.status()),
        Some(TaskStatus::InProgress)
    );
    Ok(())
}
