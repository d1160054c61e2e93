//! Project endpoints, including the tasks nested under a project.

use crate::application::ApplicationServices;
use crate::http::{
    auth::AuthUser,
    dto::{
        CreateProjectBody, CreateTaskBody, ProjectDeletedResponse, ProjectOverviewResponse,
        ProjectResponse, TaskResponse, UpdateProjectBody,
    },
    error::ApiResult,
};
use crate::project::domain::{ProjectCriteria, ProjectId};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

/// `GET /api/projects`
///
/// Lists every project with its tasks and derived status.
pub async fn list_projects<A: ApplicationServices>(
    _auth: AuthUser,
    State(app): State<A>,
) -> ApiResult<Json<Vec<ProjectOverviewResponse>>> {
    let projects = app.projects().list_projects().await?;
    Ok(Json(
        projects.iter().map(ProjectOverviewResponse::from).collect(),
    ))
}

/// `GET /api/projects/board?status=..&taskCount=asc|desc&dueDate=asc|desc`
pub async fn project_board<A: ApplicationServices>(
    _auth: AuthUser,
    State(app): State<A>,
    Query(criteria): Query<ProjectCriteria>,
) -> ApiResult<Json<Vec<ProjectOverviewResponse>>> {
    let projects = app.projects().board(&criteria).await?;
    Ok(Json(
        projects.iter().map(ProjectOverviewResponse::from).collect(),
    ))
}

/// `POST /api/projects`
pub async fn create_project<A: ApplicationServices>(
    _auth: AuthUser,
    State(app): State<A>,
    Json(body): Json<CreateProjectBody>,
) -> ApiResult<(StatusCode, Json<ProjectResponse>)> {
    let project = app.projects().create_project(body.into()).await?;
    Ok((StatusCode::CREATED, Json(ProjectResponse::from(&project))))
}

/// `GET /api/projects/{id}`
pub async fn get_project<A: ApplicationServices>(
    _auth: AuthUser,
    State(app): State<A>,
    Path(id): Path<ProjectId>,
) -> ApiResult<Json<ProjectOverviewResponse>> {
    let project = app.projects().get_project(id).await?;
    Ok(Json(ProjectOverviewResponse::from(&project)))
}

/// `PATCH /api/projects/{id}`
pub async fn update_project<A: ApplicationServices>(
    _auth: AuthUser,
    State(app): State<A>,
    Path(id): Path<ProjectId>,
    Json(body): Json<UpdateProjectBody>,
) -> ApiResult<Json<ProjectResponse>> {
    let project = app.projects().update_project(id, body.into()).await?;
    Ok(Json(ProjectResponse::from(&project)))
}

/// `DELETE /api/projects/{id}`
///
/// Removes the project and every task it owns.
pub async fn delete_project<A: ApplicationServices>(
    _auth: AuthUser,
    State(app): State<A>,
    Path(id): Path<ProjectId>,
) -> ApiResult<Json<ProjectDeletedResponse>> {
    let deleted = app.projects().delete_project(id).await?;
    Ok(Json(deleted.into()))
}

/// `GET /api/projects/{id}/tasks`
pub async fn list_project_tasks<A: ApplicationServices>(
    _auth: AuthUser,
    State(app): State<A>,
    Path(id): Path<ProjectId>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = app.tasks().list_by_project(id).await?;
    Ok(Json(tasks.iter().map(TaskResponse::from).collect()))
}

/// `POST /api/projects/{id}/tasks`
///
/// The signed-in user becomes the task author.
pub async fn create_project_task<A: ApplicationServices>(
    auth: AuthUser,
    State(app): State<A>,
    Path(id): Path<ProjectId>,
    Json(body): Json<CreateTaskBody>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let author = auth.session().user_id().clone();
    let task = app
        .tasks()
        .create_task(body.into_request(id, author))
        .await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}
