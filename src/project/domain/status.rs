//! Display status derived from a project's tasks.

use super::ParseProjectStatusError;
use crate::task::domain::TaskStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Completion summary of a project, recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// The project owns no tasks.
    #[serde(rename = "No Tasks")]
    NoTasks,
    /// At least one task is not completed.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Every task is completed.
    #[serde(rename = "Completed")]
    Completed,
}

impl ProjectStatus {
    /// Derives the status from the statuses of a project's tasks.
    #[must_use]
    pub fn derive(statuses: impl IntoIterator<Item = TaskStatus>) -> Self {
        let mut any_task = false;
        for status in statuses {
            if !status.is_completed() {
                return Self::InProgress;
            }
            any_task = true;
        }
        if any_task { Self::Completed } else { Self::NoTasks }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoTasks => "No Tasks",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<&str> for ProjectStatus {
    type Error = ParseProjectStatusError;

    /// Accepts labels (`"No Tasks"`) and identifier forms (`no_tasks`).
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '_' | '-'))
            .map(|ch| ch.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "notasks" => Ok(Self::NoTasks),
            "inprogress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseProjectStatusError(value.to_owned())),
        }
    }
}
