//! A project together with the tasks it owns.

use super::{Project, ProjectStatus};
use crate::task::domain::Task;

/// Read model pairing a project with its tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectWithTasks {
    project: Project,
    tasks: Vec<Task>,
}

impl ProjectWithTasks {
    /// Pairs a project with its tasks.
    #[must_use]
    pub const fn new(project: Project, tasks: Vec<Task>) -> Self {
        Self { project, tasks }
    }

    /// Returns the project.
    #[must_use]
    pub const fn project(&self) -> &Project {
        &self.project
    }

    /// Returns the owned tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the number of owned tasks.
    #[must_use]
    pub const fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Derives the display status from the owned tasks.
    #[must_use]
    pub fn status(&self) -> ProjectStatus {
        ProjectStatus::derive(self.tasks.iter().map(Task::status))
    }
}
