//! Request handlers, one module per resource.

mod health;
mod projects;
mod tasks;
mod users;

pub use health::health;
pub use projects::{
    create_project, create_project_task, delete_project, get_project, list_project_tasks,
    list_projects, project_board, update_project,
};
pub use tasks::{delete_task, get_task, set_task_status, update_task};
pub use users::{list_users, sign_up};
