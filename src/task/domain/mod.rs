//! Domain model for tasks.
//!
//! A task belongs to exactly one project, carries a flat status and a
//! priority, and is linked to an author and any number of assignees. All
//! infrastructure concerns stay outside of this boundary.

mod error;
mod ids;
mod status;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use status::{TaskPriority, TaskStatus};
pub use task::{PersistedTaskData, Task, TaskChanges, TaskDraft};
