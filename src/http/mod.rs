//! JSON-over-HTTP surface.
//!
//! Every route under `/api` except signup requires an
//! `Authorization: Bearer <token>` header resolved through the session port.
//! Errors render as `{ "code": ..., "error": ... }`.

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
mod router;

pub use auth::AuthUser;
pub use error::{ApiError, ApiResult};
pub use router::build_router;
