//! Commit type as reported by the GitHub API.

use serde::{Deserialize, Serialize};

/// A commit returned by the compare endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// The full commit SHA.
    pub sha: String,

    /// The full commit message (subject + body).
    pub message: String,

    /// The GitHub login of the author, if GitHub could map one.
    pub author_login: Option<String>,
}

impl CommitRecord {
    /// Creates a new commit record.
    #[must_use]
    pub fn new(
        sha: impl Into<String>,
        message: impl Into<String>,
        author_login: Option<String>,
    ) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
            author_login,
        }
    }

    /// Returns the message up to the first newline.
    ///
    /// Only `\n` splits; a trailing `\r` stays part of the summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.message
            .split_once('\n')
            .map_or(self.message.as_str(), |(summary, _)| summary)
    }

    /// Returns the author login, or an empty string when unknown.
    #[must_use]
    pub fn author_handle(&self) -> &str {
        self.author_login.as_deref().unwrap_or("")
    }
}
