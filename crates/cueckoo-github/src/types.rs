//! Request and response types.

use std::fmt;

use cueckoo_commit::CommitRecord;
use serde::{Deserialize, Serialize};

/// A GitHub repository, identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    /// Repository owner (user or organisation).
    pub owner: String,

    /// Repository name.
    pub repo: String,
}

impl RepoId {
    /// Creates a new repository identifier.
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// One page of a commit comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparePage {
    /// Commits on this page, in the order GitHub returned them.
    pub commits: Vec<CommitRecord>,

    /// Last page number from the `Link` header; 0 when there is none.
    pub last_page: u32,
}

/// Body of a repository dispatch request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchRequest {
    /// Event type delivered to workflows listening for `repository_dispatch`.
    pub event_type: String,

    /// Arbitrary JSON handed to the workflow as `github.event.client_payload`.
    pub client_payload: serde_json::Value,
}

/// Wire shape of the compare response. Only the fields we read.
#[derive(Debug, Deserialize)]
pub(crate) struct CompareResponse {
    #[serde(default)]
    pub commits: Vec<WireCommit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCommit {
    pub sha: String,
    pub commit: WireCommitDetail,
    pub author: Option<WireUser>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCommitDetail {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireUser {
    pub login: Option<String>,
}

impl From<WireCommit> for CommitRecord {
    fn from(wire: WireCommit) -> Self {
        CommitRecord::new(
            wire.sha,
            wire.commit.message,
            wire.author.and_then(|a| a.login),
        )
    }
}

/// GitHub error body, e.g. `{"message": "Not Found"}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_id_display() {
        let repo = RepoId::new("cue-lang", "cue");
        assert_eq!(repo.to_string(), "cue-lang/cue");
    }

    #[test]
    fn test_compare_response_with_null_author() {
        let json = r#"{
            "status": "ahead",
            "commits": [
                {"sha": "aaa", "commit": {"message": "one"}, "author": {"login": "alice"}},
                {"sha": "bbb", "commit": {"message": "two"}, "author": null}
            ]
        }"#;

        let response: CompareResponse = serde_json::from_str(json).unwrap();
        let commits: Vec<CommitRecord> = response.commits.into_iter().map(Into::into).collect();
        assert_eq!(commits[0].author_handle(), "alice");
        assert_eq!(commits[1].author_handle(), "");
        assert_eq!(commits[1].sha, "bbb");
    }

    #[test]
    fn test_compare_response_without_commits() {
        let response: CompareResponse = serde_json::from_str("{}").unwrap();
        assert!(response.commits.is_empty());
    }

    #[test]
    fn test_dispatch_request_serialize() {
        let request = DispatchRequest {
            event_type: "trybot run for abc".to_string(),
            client_payload: serde_json::json!({"type": "trybot"}),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["event_type"], "trybot run for abc");
        assert_eq!(json["client_payload"]["type"], "trybot");
    }
}
