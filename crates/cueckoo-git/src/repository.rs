//! Git repository wrapper.

use std::path::Path;

use cueckoo_commit::LocalCommit;
use git2::{Commit, Repository as Git2Repo};
use tracing::debug;

use crate::{GitError, GitResult};

/// A Git repository wrapper.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Discovers the repository from the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no repository is found.
    pub fn discover() -> GitResult<Self> {
        Self::discover_from(".")
    }

    /// Discovers the repository containing `path`, searching parent
    /// directories.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NotARepo`] if no repository is found.
    pub fn discover_from(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        let inner =
            Git2Repo::discover(path).map_err(|_| GitError::NotARepo(path.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Resolves a revision (hash, branch, tag, `HEAD~1`, ...) to a commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the revision does not name a commit.
    pub fn resolve_commit(&self, revision: &str) -> GitResult<LocalCommit> {
        let object = self
            .inner
            .revparse_single(revision)
            .map_err(|_| GitError::RevisionNotFound(revision.to_string()))?;
        let commit = object
            .peel_to_commit()
            .map_err(|_| GitError::RevisionNotFound(revision.to_string()))?;
        Ok(to_local(&commit))
    }

    /// Returns commits reachable from `HEAD` but not from `upstream`.
    ///
    /// Commits are returned newest first, like `git log upstream..HEAD`.
    ///
    /// # Errors
    ///
    /// Returns an error if `upstream` cannot be resolved or the history
    /// cannot be walked.
    pub fn pending_commits(&self, upstream: &str) -> GitResult<Vec<LocalCommit>> {
        let upstream_oid = self
            .inner
            .revparse_single(upstream)
            .and_then(|object| object.peel_to_commit())
            .map_err(|_| GitError::RevisionNotFound(upstream.to_string()))?
            .id();

        let mut revwalk = self.inner.revwalk()?;
        revwalk.push_head()?;
        revwalk.hide(upstream_oid)?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.inner.find_commit(oid?)?;
            commits.push(to_local(&commit));
        }

        debug!(upstream, count = commits.len(), "listed pending commits");
        Ok(commits)
    }
}

fn to_local(commit: &Commit<'_>) -> LocalCommit {
    LocalCommit::new(commit.id().to_string(), commit.message().unwrap_or(""))
}
