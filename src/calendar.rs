//! Conversion between wire-format ISO-8601 date strings and calendar dates.
//!
//! Clients send dates either as plain calendar dates (`2025-03-14`) or as
//! full RFC 3339 timestamps (`2025-03-14T00:00:00.000Z`). Both collapse to a
//! [`NaiveDate`] taken in UTC so a date written and read back never drifts
//! across a timezone boundary.

use crate::field_update::FieldUpdate;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

/// Wire format used when rendering calendar dates.
const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Error returned when a wire date string cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid ISO-8601 date: '{0}'")]
pub struct InvalidDateError(pub String);

/// Parses an ISO-8601 calendar date or RFC 3339 timestamp.
///
/// # Errors
///
/// Returns [`InvalidDateError`] when the value matches neither format.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, InvalidDateError> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.with_timezone(&Utc).date_naive())
        .map_err(|_| InvalidDateError(value.to_owned()))
}

/// Parses an optional wire date, treating a blank string as absent.
///
/// # Errors
///
/// Returns [`InvalidDateError`] when a non-blank value cannot be parsed.
pub fn parse_optional_iso_date(value: Option<&str>) -> Result<Option<NaiveDate>, InvalidDateError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => parse_iso_date(raw).map(Some),
        _ => Ok(None),
    }
}

/// Parses the date carried by a partial update.
///
/// A blank string clears the field, matching [`parse_optional_iso_date`].
///
/// # Errors
///
/// Returns [`InvalidDateError`] when a non-blank value cannot be parsed.
pub fn parse_iso_date_update(
    update: FieldUpdate<String>,
) -> Result<FieldUpdate<NaiveDate>, InvalidDateError> {
    match update {
        FieldUpdate::Set(raw) if raw.trim().is_empty() => Ok(FieldUpdate::Clear),
        other => other.try_map(|raw| parse_iso_date(&raw)),
    }
}

/// Renders a calendar date in wire format.
#[must_use]
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}
