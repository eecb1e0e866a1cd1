//! Test doubles for the GitHub API and local history.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use cueckoo_commit::{CommitRecord, LocalCommit};
use cueckoo_git::{GitError, GitResult};
use cueckoo_github::{ComparePage, DispatchRequest, GithubApi, GithubError, GithubResult, RepoId};

use crate::CommitSource;

/// Builds a transport-style error for scripted failures.
pub fn server_error() -> GithubError {
    GithubError::Status {
        url: "https://api.github.com/test".to_string(),
        status: 502,
        message: "Bad Gateway".to_string(),
    }
}

pub fn record(sha: &str, message: &str, author: Option<&str>) -> CommitRecord {
    CommitRecord::new(sha, message, author.map(String::from))
}

pub fn page(commits: Vec<CommitRecord>, last_page: u32) -> ComparePage {
    ComparePage { commits, last_page }
}

/// A scripted GitHub API. Compare pages are handed out in order.
#[derive(Default)]
pub struct FakeGithub {
    pages: RefCell<VecDeque<GithubResult<ComparePage>>>,
    compare_calls: RefCell<Vec<(RepoId, String, String, u32)>>,
    dispatches: RefCell<Vec<(RepoId, DispatchRequest)>>,
    fail_dispatch_to: Option<RepoId>,
}

impl FakeGithub {
    pub fn with_pages(pages: Vec<GithubResult<ComparePage>>) -> Self {
        Self {
            pages: RefCell::new(pages.into()),
            ..Self::default()
        }
    }

    pub fn failing_dispatch_to(repo: RepoId) -> Self {
        Self {
            fail_dispatch_to: Some(repo),
            ..Self::default()
        }
    }

    pub fn compare_calls(&self) -> Vec<(RepoId, String, String, u32)> {
        self.compare_calls.borrow().clone()
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.compare_calls.borrow().iter().map(|c| c.3).collect()
    }

    pub fn dispatches(&self) -> Vec<(RepoId, DispatchRequest)> {
        self.dispatches.borrow().clone()
    }
}

impl GithubApi for FakeGithub {
    fn compare_commits(
        &self,
        repo: &RepoId,
        base: &str,
        head: &str,
        page: u32,
    ) -> GithubResult<ComparePage> {
        self.compare_calls
            .borrow_mut()
            .push((repo.clone(), base.to_string(), head.to_string(), page));
        self.pages
            .borrow_mut()
            .pop_front()
            .expect("unexpected compare call")
    }

    fn repository_dispatch(&self, repo: &RepoId, request: &DispatchRequest) -> GithubResult<()> {
        if self.fail_dispatch_to.as_ref() == Some(repo) {
            return Err(server_error());
        }
        self.dispatches
            .borrow_mut()
            .push((repo.clone(), request.clone()));
        Ok(())
    }
}

pub fn local(hash: &str, message: &str) -> LocalCommit {
    LocalCommit::new(hash, message)
}

/// Local history with a fixed set of pending commits.
#[derive(Default)]
pub struct FakeSource {
    pub pending: Vec<LocalCommit>,
    pub revisions: HashMap<String, LocalCommit>,
}

impl CommitSource for FakeSource {
    fn pending_commits(&self, _upstream: &str) -> GitResult<Vec<LocalCommit>> {
        Ok(self.pending.clone())
    }

    fn resolve_commit(&self, revision: &str) -> GitResult<LocalCommit> {
        self.revisions
            .get(revision)
            .cloned()
            .ok_or_else(|| GitError::RevisionNotFound(revision.to_string()))
    }
}
