//! Commit types for cueckoo.
//!
//! This crate provides the commit types shared by the commands:
//! - [`CommitRecord`]: A commit as reported by the GitHub compare endpoint
//! - [`LocalCommit`]: A commit read from the local Git repository

mod local;
mod remote;

pub use local::{LocalCommit, is_change_id};
pub use remote::CommitRecord;
