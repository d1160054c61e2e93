//! Step definitions for project board scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
