//! Core type definitions for reqflow.
//!
//! This crate defines the small vocabulary shared by every other crate in
//! the workspace:
//! - Request paths (ordered key sequences into the state tree)
//! - Request statuses (loading / loaded / error)
//! - Tagged actions, the only way state changes are expressed
//!
//! Entity merging, the store and the async coordinators live in their own
//! crates and build on these types.

mod action;
mod path;
mod status;

pub use action::Action;
pub use path::{PathSegment, RequestPath};
pub use status::RequestStatus;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid path segment: {0}")]
    InvalidSegment(String),
}
