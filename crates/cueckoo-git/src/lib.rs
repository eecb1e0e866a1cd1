//! Git abstraction layer for cueckoo.
//!
//! This crate provides the local Git operations the trybot command needs:
//! - Repository discovery
//! - Revision resolution
//! - Pending commit listing relative to an upstream branch

mod error;
mod repository;

pub use error::{GitError, GitResult};
pub use repository::Repository;
