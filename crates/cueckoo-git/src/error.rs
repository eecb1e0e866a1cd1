//! Git error types.

use thiserror::Error;

/// Git-related errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not a git repository.
    #[error("not a git repository: {0}")]
    NotARepo(std::path::PathBuf),

    /// Revision could not be resolved to a commit.
    #[error("revision not found: {0}")]
    RevisionNotFound(String),

    /// Git2 error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Result type for git operations.
pub type GitResult<T> = Result<T, GitError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_not_a_repo_display() {
        let err = GitError::NotARepo(PathBuf::from("/tmp/not-git"));
        assert_eq!(err.to_string(), "not a git repository: /tmp/not-git");
    }

    #[test]
    fn test_revision_not_found_display() {
        let err = GitError::RevisionNotFound("origin/master".to_string());
        assert_eq!(err.to_string(), "revision not found: origin/master");
    }

    #[test]
    fn test_error_is_debug() {
        let err = GitError::RevisionNotFound("x".to_string());
        let debug = format!("{err:?}");
        assert!(debug.contains("RevisionNotFound"));
    }
}
