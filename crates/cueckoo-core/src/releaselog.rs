//! Release log generation.
//!
//! Produces a Markdown bullet list of the commits between two refs, similar to
//! the change list GitHub generates for pull-request based releases. The list
//! comes from the compare endpoint, so no local clone is needed.

use std::iter::FusedIterator;

use cueckoo_commit::CommitRecord;
use cueckoo_github::{ComparePage, GithubApi, GithubResult, RepoId};
use tracing::{debug, info};

use crate::{CoreError, CoreResult};

/// The two refs of a release log, read like `git log FROM..TO`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRange {
    from: String,
    to: String,
}

impl ReleaseRange {
    /// Creates a range from two refs.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArguments`] if either ref is empty.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> CoreResult<Self> {
        let (from, to) = (from.into(), to.into());
        if from.is_empty() || to.is_empty() {
            return Err(CoreError::InvalidArguments(
                "range start and end must not be empty".to_string(),
            ));
        }
        Ok(Self { from, to })
    }

    /// Creates a range from raw command-line arguments.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArguments`] unless exactly two non-empty
    /// arguments are given.
    pub fn from_args(args: &[String]) -> CoreResult<Self> {
        match args {
            [from, to] => Self::new(from.as_str(), to.as_str()),
            _ => Err(CoreError::InvalidArguments(format!(
                "expected exactly two args which will be interpreted like git log $1..$2, like: v0.8.0-alpha.1 master (got {})",
                args.len()
            ))),
        }
    }

    /// Returns the range start.
    #[must_use]
    pub fn from_ref(&self) -> &str {
        &self.from
    }

    /// Returns the range end.
    #[must_use]
    pub fn to_ref(&self) -> &str {
        &self.to
    }
}

/// Lazily fetches the pages of a commit comparison.
///
/// Stops after the page whose reported last page is not beyond the current
/// one. GitHub reports 0 when everything fits on one page, which ends the
/// sequence after the first request. After an error the iterator is exhausted.
pub struct ComparePages<'a, A: ?Sized> {
    api: &'a A,
    repo: &'a RepoId,
    range: &'a ReleaseRange,
    page: u32,
    done: bool,
}

impl<'a, A: GithubApi + ?Sized> ComparePages<'a, A> {
    /// Starts at page 1.
    pub fn new(api: &'a A, repo: &'a RepoId, range: &'a ReleaseRange) -> Self {
        Self {
            api,
            repo,
            range,
            page: 1,
            done: false,
        }
    }
}

impl<A: GithubApi + ?Sized> Iterator for ComparePages<'_, A> {
    type Item = GithubResult<ComparePage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self
            .api
            .compare_commits(self.repo, &self.range.from, &self.range.to, self.page);

        match &result {
            Ok(page) if page.last_page > self.page => self.page += 1,
            _ => self.done = true,
        }

        Some(result)
    }
}

impl<A: GithubApi + ?Sized> FusedIterator for ComparePages<'_, A> {}

/// Fetches every commit in the range, newest first as GitHub returns them.
///
/// # Errors
///
/// Returns [`CoreError::RemoteFetch`] on the first failing page; commits
/// gathered from earlier pages are dropped.
pub fn fetch_commits<A: GithubApi + ?Sized>(
    api: &A,
    repo: &RepoId,
    range: &ReleaseRange,
) -> CoreResult<Vec<CommitRecord>> {
    let mut commits = Vec::new();

    for (index, page) in ComparePages::new(api, repo, range).enumerate() {
        let page = page.map_err(CoreError::RemoteFetch)?;
        debug!(
            page = index + 1,
            last_page = page.last_page,
            count = page.commits.len(),
            "fetched compare page"
        );
        commits.extend(page.commits);
    }

    Ok(commits)
}

/// Renders commits (newest first) as a collapsible Markdown list, oldest first.
#[must_use]
pub fn render_release_log(from_ref: &str, commits: &[CommitRecord]) -> String {
    let mut out = format!(
        "<details>\n\n<summary><b>Full list of changes since {from_ref}</b></summary>\n\n"
    );

    for commit in commits.iter().rev() {
        out.push_str(&format!(
            "* {} by @{} in {}\n",
            commit.summary(),
            commit.author_handle(),
            commit.sha
        ));
    }

    out.push_str("\n</details>\n");
    out
}

/// Fetches the range from `repo` and renders the release log.
///
/// Nothing is rendered unless every page was fetched.
///
/// # Errors
///
/// Returns [`CoreError::RemoteFetch`] if any page cannot be fetched.
pub fn generate_release_log<A: GithubApi + ?Sized>(
    api: &A,
    repo: &RepoId,
    range: &ReleaseRange,
) -> CoreResult<String> {
    let commits = fetch_commits(api, repo, range)?;
    info!(
        %repo,
        from = range.from_ref(),
        to = range.to_ref(),
        count = commits.len(),
        "gathered commits for release log"
    );
    Ok(render_release_log(range.from_ref(), &commits))
}
