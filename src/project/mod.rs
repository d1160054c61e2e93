//! Projects and the board view over them.
//!
//! The stored record carries only name, description and dates. Status is
//! never persisted; [`domain::ProjectStatus::derive`] computes it from the
//! owned tasks each time a project is read.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
