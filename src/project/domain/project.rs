//! Project aggregate root.

use super::{ProjectDomainError, ProjectId};
use crate::field_update::FieldUpdate;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A named unit of work with an optional date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted start date.
    pub start_date: Option<NaiveDate>,
    /// Persisted end date.
    pub end_date: Option<NaiveDate>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validated field values for a project that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    name: String,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl ProjectDraft {
    /// Creates a draft with the required name.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] if the name is blank.
    pub fn new(name: &str) -> Result<Self, ProjectDomainError> {
        Ok(Self {
            name: normalize_name(name)?,
            description: None,
            start_date: None,
            end_date: None,
        })
    }

    /// Sets the description; blank descriptions are dropped.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = normalize_text(description.into());
        self
    }

    /// Sets the start date.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the end date.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }
}

/// Partial update applied to an existing project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectChanges {
    /// Replacement name.
    pub name: Option<String>,
    /// Description change.
    pub description: FieldUpdate<String>,
    /// Start date change.
    pub start_date: FieldUpdate<NaiveDate>,
    /// End date change.
    pub end_date: FieldUpdate<NaiveDate>,
}

impl Project {
    /// Creates a new project from a validated draft.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EndBeforeStart`] when the draft's end
    /// date precedes its start date.
    pub fn create(draft: ProjectDraft, clock: &impl Clock) -> Result<Self, ProjectDomainError> {
        ensure_date_order(draft.start_date, draft.end_date)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: ProjectId::new(),
            name: draft.name,
            description: draft.description,
            start_date: draft.start_date,
            end_date: draft.end_date,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            start_date: data.start_date,
            end_date: data.end_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the start date, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the end date, if any.
    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update.
    ///
    /// The project is left untouched when validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyName`] for a blank replacement name
    /// and [`ProjectDomainError::EndBeforeStart`] when the resulting date
    /// range is inverted.
    pub fn apply(
        &mut self,
        changes: ProjectChanges,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        let ProjectChanges {
            name,
            description,
            start_date,
            end_date,
        } = changes;

        let next_name = name.as_deref().map(normalize_name).transpose()?;
        let mut next_start = self.start_date;
        let mut next_end = self.end_date;
        start_date.apply_to(&mut next_start);
        end_date.apply_to(&mut next_end);
        ensure_date_order(next_start, next_end)?;

        if let Some(valid_name) = next_name {
            self.name = valid_name;
        }
        normalize_text_update(description).apply_to(&mut self.description);
        self.start_date = next_start;
        self.end_date = next_end;
        self.updated_at = clock.utc();
        Ok(())
    }
}

fn normalize_name(name: &str) -> Result<String, ProjectDomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ProjectDomainError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

fn normalize_text(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn normalize_text_update(update: FieldUpdate<String>) -> FieldUpdate<String> {
    match update {
        FieldUpdate::Set(text) => FieldUpdate::from_option(normalize_text(text)),
        other => other,
    }
}

fn ensure_date_order(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), ProjectDomainError> {
    if let (Some(start_date), Some(end_date)) = (start, end) {
        if end_date < start_date {
            return Err(ProjectDomainError::EndBeforeStart {
                start: start_date,
                end: end_date,
            });
        }
    }
    Ok(())
}
