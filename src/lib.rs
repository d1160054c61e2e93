//! Taskboard: project and task tracking with a kanban board.
//!
//! Projects own tasks; each task moves through a flat four-state workflow and
//! a project's display status is derived from its tasks. The board view
//! filters and orders projects, and applies task status changes
//! optimistically with compensation when the server rejects them.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration over ports, generic over the clock
//!
//! # Modules
//!
//! - [`project`]: Projects, derived status and the board filter/sort pipeline
//! - [`task`]: Tasks, the status workflow and task lifecycle operations
//! - [`identity`]: Users and authentication-provider sessions
//! - [`board`]: Client-side kanban and dashboard state
//! - [`http`]: JSON API over `axum`
//! - [`application`]: Service wiring shared by the HTTP surface
//! - [`config`]: TOML server configuration

pub mod application;
pub mod board;
pub mod calendar;
pub mod config;
pub mod field_update;
pub mod http;
pub mod identity;
pub mod project;
pub mod task;
