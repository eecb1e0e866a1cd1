//! Core error types.

use thiserror::Error;

use crate::trybot::EventKind;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The command was called with the wrong arguments.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Fetching a page of the commit comparison failed.
    #[error("failed to compare commits: {0}")]
    RemoteFetch(#[source] cueckoo_github::GithubError),

    /// Sending a repository dispatch failed.
    #[error("failed to trigger {kind} run for {commit}: {source}")]
    Dispatch {
        kind: EventKind,
        commit: String,
        #[source]
        source: cueckoo_github::GithubError,
    },

    /// No pending commits on the current branch.
    #[error("no pending commits found relative to {upstream}")]
    NoPendingCommits { upstream: String },

    /// Several pending commits and no selection.
    #[error(
        "found {count} pending commits; specify which commits or change IDs to run, or HEAD to run all of them"
    )]
    AmbiguousPendingCommits { count: usize },

    /// A change ID did not match any pending commit.
    #[error("no pending commit has change ID {0}")]
    UnknownChangeId(String),

    /// A commit has no `Change-Id` trailer.
    #[error("commit {0} has no Change-Id trailer")]
    MissingChangeId(String),

    /// The dispatch payload could not be encoded.
    #[error("failed to encode dispatch payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Git error.
    #[error("git error: {0}")]
    Git(#[from] cueckoo_git::GitError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] cueckoo_config::ConfigError),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
