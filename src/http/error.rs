//! HTTP error type and its JSON rendering.

use crate::identity::{ports::SessionResolverError, services::UserDirectoryError};
use crate::project::services::ProjectCatalogError;
use crate::task::{ports::TaskRepositoryError, services::TaskLifecycleError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Error returned by request handlers.
///
/// Every variant renders as `{ "code": ..., "error": ... }`. Internal causes
/// are logged and replaced by the public message.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The addressed resource does not exist.
    #[error("{0}")]
    NotFound(String),
    /// The request was malformed or failed validation.
    #[error("{0}")]
    Validation(String),
    /// The request collides with existing data.
    #[error("{0}")]
    Conflict(String),
    /// No valid bearer token was supplied.
    #[error("{0}")]
    Unauthorized(String),
    /// The operation failed for a reason not shown to the caller.
    #[error("{message}")]
    Internal {
        /// Message returned to the caller.
        message: String,
        /// Cause written to the log.
        cause: String,
    },
}

/// Convenience alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    fn internal(message: impl Into<String>, cause: &impl std::fmt::Display) -> Self {
        Self::Internal {
            message: message.into(),
            cause: cause.to_string(),
        }
    }

    const fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if let Self::Internal { message, cause } = &self {
            tracing::error!(error = %cause, "{message}");
        }
        let body = json!({
            "code": code,
            "error": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

impl From<ProjectCatalogError> for ApiError {
    fn from(err: ProjectCatalogError) -> Self {
        match err {
            ProjectCatalogError::Domain(domain) => Self::Validation(domain.to_string()),
            ProjectCatalogError::NotFound(_) => Self::NotFound(err.to_string()),
            ProjectCatalogError::Repository(ref source) => {
                Self::internal("failed to access projects", source)
            }
            ProjectCatalogError::Tasks(ref source) => {
                Self::internal("failed to access project tasks", source)
            }
        }
    }
}

impl From<TaskLifecycleError> for ApiError {
    fn from(err: TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::Domain(domain) => Self::Validation(domain.to_string()),
            TaskLifecycleError::NotFound(_) | TaskLifecycleError::ProjectNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            TaskLifecycleError::Operation {
                operation,
                ref source,
            } => match source {
                TaskRepositoryError::NotFound(_) => Self::NotFound(operation.to_string()),
                _ => Self::internal(operation.to_string(), source),
            },
        }
    }
}

impl From<UserDirectoryError> for ApiError {
    fn from(err: UserDirectoryError) -> Self {
        match err {
            UserDirectoryError::Domain(domain) => Self::Validation(domain.to_string()),
            UserDirectoryError::AlreadyExists(_) => Self::Conflict(err.to_string()),
            UserDirectoryError::Repository(ref source) => {
                Self::internal("failed to access users", source)
            }
        }
    }
}

impl From<SessionResolverError> for ApiError {
    fn from(err: SessionResolverError) -> Self {
        Self::internal("failed to resolve session", &err)
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use crate::task::{
        domain::TaskId,
        ports::TaskRepositoryError,
        services::{TaskLifecycleError, TaskOperation},
    };
    use axum::{http::StatusCode, response::IntoResponse};
    use http_body_util::BodyExt;
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::NotFound("task not found".to_owned()), StatusCode::NOT_FOUND)]
    #[case(ApiError::Validation("bad".to_owned()), StatusCode::BAD_REQUEST)]
    #[case(ApiError::Conflict("dup".to_owned()), StatusCode::CONFLICT)]
    #[case(ApiError::Unauthorized("no".to_owned()), StatusCode::UNAUTHORIZED)]
    fn variants_map_to_status(#[case] err: ApiError, #[case] expected: StatusCode) {
        assert_eq!(err.into_response().status(), expected);
    }

    #[tokio::test]
    async fn internal_errors_hide_their_cause() {
        let err = ApiError::from(TaskLifecycleError::Operation {
            operation: TaskOperation::Create,
            source: TaskRepositoryError::persistence(std::io::Error::other("disk on fire")),
        });

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body readable")
            .to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"], "failed to create task");
    }

    #[rstest]
    fn missing_task_on_update_is_not_found() {
        let id = TaskId::new();
        let err = ApiError::from(TaskLifecycleError::Operation {
            operation: TaskOperation::Update,
            source: TaskRepositoryError::NotFound(id),
        });
        assert!(matches!(err, ApiError::NotFound(message) if message == "failed to update task"));
    }
}
