//! Core library for cueckoo.
//!
//! This crate holds the logic behind the two commands:
//! - [`releaselog`]: paginated commit comparison rendered as Markdown
//! - [`trybot`]: target selection and repository dispatch for trybot runs

mod error;
pub mod releaselog;
pub mod trybot;

#[cfg(test)]
mod testing;

pub use error::{CoreError, CoreResult};
pub use releaselog::{ComparePages, ReleaseRange, fetch_commits, generate_release_log, render_release_log};
pub use trybot::{CommitSource, DispatchPayload, EventKind, TrybotOptions, TrybotTrigger};
