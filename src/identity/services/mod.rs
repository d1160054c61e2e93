//! Application services for user signup and lookup.

mod directory;

pub use directory::{
    SignUpRequest, UserDirectoryError, UserDirectoryResult, UserDirectoryService,
};
