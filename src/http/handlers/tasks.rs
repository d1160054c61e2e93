//! Endpoints addressing a single task.

use crate::application::ApplicationServices;
use crate::http::{
    auth::AuthUser,
    dto::{StatusChangeBody, TaskDeletedResponse, TaskResponse, UpdateTaskBody},
    error::ApiResult,
};
use crate::task::{domain::TaskId, services::TaskLifecycleError};
use axum::{
    Json,
    extract::{Path, State},
};

/// `GET /api/tasks/{id}`
pub async fn get_task<A: ApplicationServices>(
    _auth: AuthUser,
    State(app): State<A>,
    Path(id): Path<TaskId>,
) -> ApiResult<Json<TaskResponse>> {
    let task = app
        .tasks()
        .find_by_id(id)
        .await?
        .ok_or(TaskLifecycleError::NotFound(id))?;
    Ok(Json(TaskResponse::from(&task)))
}

/// `PATCH /api/tasks/{id}`
pub async fn update_task<A: ApplicationServices>(
    _auth: AuthUser,
    State(app): State<A>,
    Path(id): Path<TaskId>,
    Json(body): Json<UpdateTaskBody>,
) -> ApiResult<Json<TaskResponse>> {
    let task = app.tasks().update_task(id, body.into()).await?;
    Ok(Json(TaskResponse::from(&task)))
}

/// `PUT /api/tasks/{id}/status`
pub async fn set_task_status<A: ApplicationServices>(
    _auth: AuthUser,
    State(app): State<A>,
    Path(id): Path<TaskId>,
    Json(body): Json<StatusChangeBody>,
) -> ApiResult<Json<TaskResponse>> {
    let task = app.tasks().set_status(id, body.new_status).await?;
    Ok(Json(TaskResponse::from(&task)))
}

/// `DELETE /api/tasks/{id}`
pub async fn delete_task<A: ApplicationServices>(
    _auth: AuthUser,
    State(app): State<A>,
    Path(id): Path<TaskId>,
) -> ApiResult<Json<TaskDeletedResponse>> {
    let deleted = app.tasks().delete_task(id).await?;
    Ok(Json(deleted.into()))
}
