//! Tasks: units of work owned by a project.
//!
//! A task starts life as a validated [`domain::TaskDraft`], moves through the
//! four-state [`domain::TaskStatus`] workflow via
//! [`services::TaskLifecycleService::set_status`], and is edited through
//! partial updates where a supplied assignee list replaces the stored one.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
