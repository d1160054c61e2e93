//! Port contracts for users and sessions.

pub mod repository;
pub mod session;

pub use repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
pub use session::{SessionResolver, SessionResolverError};
