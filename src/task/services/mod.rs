//! Application services for task orchestration.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, TaskDeleted, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, TaskOperation, UpdateTaskRequest,
};
