//! `PostgreSQL` adapters for users and sessions.

mod models;
mod repository;
mod schema;

pub use repository::{PostgresSessionResolver, PostgresUserRepository, UserPgPool};
