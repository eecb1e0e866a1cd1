//! Trybot and unity triggering via repository dispatch.
//!
//! Target commits are picked from the pending commits of the current branch
//! (or named explicitly), and each one is announced to the main repository's
//! trybot workflow and, optionally, to the unity repository.

use std::fmt;

use cueckoo_commit::{LocalCommit, is_change_id};
use cueckoo_config::Config;
use cueckoo_git::{GitResult, Repository};
use cueckoo_github::{DispatchRequest, GithubApi, RepoId};
use serde::Serialize;
use tracing::{debug, info};

use crate::{CoreError, CoreResult};

/// Argument that selects every pending commit.
const ALL_PENDING: &str = "HEAD";

/// Read access to local history.
pub trait CommitSource {
    /// Returns commits on `HEAD` that are not on `upstream`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be read.
    fn pending_commits(&self, upstream: &str) -> GitResult<Vec<LocalCommit>>;

    /// Resolves a revision to a commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the revision does not name a commit.
    fn resolve_commit(&self, revision: &str) -> GitResult<LocalCommit>;
}

impl CommitSource for Repository {
    fn pending_commits(&self, upstream: &str) -> GitResult<Vec<LocalCommit>> {
        Repository::pending_commits(self, upstream)
    }

    fn resolve_commit(&self, revision: &str) -> GitResult<LocalCommit> {
        Repository::resolve_commit(self, revision)
    }
}

/// Kind of run being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// CI run in the main repository.
    Trybot,
    /// Run of the companion unity corpus.
    Unity,
}

impl EventKind {
    /// Returns the lowercase name used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trybot => "trybot",
            Self::Unity => "unity",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `client_payload` of a dispatch event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchPayload {
    /// Kind of run.
    #[serde(rename = "type")]
    pub kind: EventKind,

    /// Full commit SHA to test.
    #[serde(rename = "ref")]
    pub commit: String,

    /// Gerrit change ID of the commit.
    #[serde(rename = "changeID")]
    pub change_id: String,

    /// Target branch of the change.
    pub branch: String,

    /// Run even if results already exist.
    pub force: bool,
}

impl DispatchPayload {
    /// Builds the dispatch request for this payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be encoded as JSON.
    pub fn to_request(&self) -> CoreResult<DispatchRequest> {
        Ok(DispatchRequest {
            event_type: format!("{} run for {}", self.kind, self.commit),
            client_payload: serde_json::to_value(self)?,
        })
    }
}

/// Command-line switches of `runtrybot`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrybotOptions {
    /// Skip the unity run.
    pub no_unity: bool,

    /// Ask for runs even if results already exist.
    pub force: bool,
}

/// Selects target commits and sends the dispatch events.
pub struct TrybotTrigger<'a, A: ?Sized> {
    api: &'a A,
    main_repo: RepoId,
    unity_repo: Option<RepoId>,
    upstream: String,
    branch: String,
    options: TrybotOptions,
}

impl<'a, A: GithubApi + ?Sized> TrybotTrigger<'a, A> {
    /// Creates a trigger for the repositories in `config`.
    pub fn new(api: &'a A, config: &Config, options: TrybotOptions) -> Self {
        let unity_repo = (config.unity.is_enabled() && !options.no_unity)
            .then(|| RepoId::new(&config.unity.owner, &config.unity.repo));

        Self {
            api,
            main_repo: RepoId::new(&config.github.owner, &config.github.repo),
            unity_repo,
            upstream: config.git.upstream(),
            branch: config.git.branch.clone(),
            options,
        }
    }

    /// Picks the commits to run.
    ///
    /// - no arguments: the single pending commit
    /// - `HEAD`: every pending commit
    /// - a change ID: the pending commit carrying it
    /// - anything else: resolved as a git revision
    ///
    /// # Errors
    ///
    /// Returns an error if the selection is empty or ambiguous, if a change ID
    /// or revision cannot be found, or if git fails.
    pub fn select_targets<S: CommitSource + ?Sized>(
        &self,
        source: &S,
        args: &[String],
    ) -> CoreResult<Vec<LocalCommit>> {
        let mut pending: Option<Vec<LocalCommit>> = None;
        let mut load_pending = |source: &S| -> CoreResult<Vec<LocalCommit>> {
            if let Some(commits) = &pending {
                return Ok(commits.clone());
            }
            let commits = source.pending_commits(&self.upstream)?;
            debug!(upstream = %self.upstream, count = commits.len(), "loaded pending commits");
            pending = Some(commits.clone());
            Ok(commits)
        };

        if args.is_empty() {
            let mut commits = load_pending(source)?;
            return match commits.len() {
                0 => Err(CoreError::NoPendingCommits {
                    upstream: self.upstream.clone(),
                }),
                1 => Ok(vec![commits.remove(0)]),
                count => Err(CoreError::AmbiguousPendingCommits { count }),
            };
        }

        let mut targets: Vec<LocalCommit> = Vec::new();
        for arg in args {
            let selected = if arg == ALL_PENDING {
                let commits = load_pending(source)?;
                if commits.is_empty() {
                    return Err(CoreError::NoPendingCommits {
                        upstream: self.upstream.clone(),
                    });
                }
                commits
            } else if is_change_id(arg) {
                let commit = load_pending(source)?
                    .into_iter()
                    .find(|c| c.change_id() == Some(arg.as_str()))
                    .ok_or_else(|| CoreError::UnknownChangeId(arg.clone()))?;
                vec![commit]
            } else {
                vec![source.resolve_commit(arg)?]
            };

            for commit in selected {
                if !targets.iter().any(|t| t.hash == commit.hash) {
                    targets.push(commit);
                }
            }
        }

        Ok(targets)
    }

    /// Builds the payloads for one commit, trybot first.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::MissingChangeId`] if the commit has no
    /// `Change-Id` trailer.
    pub fn payloads_for(&self, commit: &LocalCommit) -> CoreResult<Vec<DispatchPayload>> {
        let change_id = commit
            .change_id()
            .ok_or_else(|| CoreError::MissingChangeId(commit.short_hash().to_string()))?;

        let payload = |kind| DispatchPayload {
            kind,
            commit: commit.hash.clone(),
            change_id: change_id.to_string(),
            branch: self.branch.clone(),
            force: self.options.force,
        };

        let mut payloads = vec![payload(EventKind::Trybot)];
        if self.unity_repo.is_some() {
            payloads.push(payload(EventKind::Unity));
        }
        Ok(payloads)
    }

    /// Selects targets and dispatches a run for each of them.
    ///
    /// Every target is checked for a change ID before anything is sent. The
    /// first failed dispatch stops the run.
    ///
    /// # Errors
    ///
    /// Returns an error from target selection, payload construction or the
    /// first failing dispatch.
    pub fn run<S: CommitSource + ?Sized>(
        &self,
        source: &S,
        args: &[String],
    ) -> CoreResult<Vec<DispatchPayload>> {
        let targets = self.select_targets(source, args)?;

        let mut payloads = Vec::new();
        for commit in &targets {
            payloads.extend(self.payloads_for(commit)?);
        }

        for payload in &payloads {
            self.dispatch(payload)?;
        }

        Ok(payloads)
    }

    fn dispatch(&self, payload: &DispatchPayload) -> CoreResult<()> {
        let repo = match payload.kind {
            EventKind::Trybot => &self.main_repo,
            EventKind::Unity => self.unity_repo.as_ref().unwrap_or(&self.main_repo),
        };
        let request = payload.to_request()?;

        self.api
            .repository_dispatch(repo, &request)
            .map_err(|source| CoreError::Dispatch {
                kind: payload.kind,
                commit: payload.commit.clone(),
                source,
            })?;

        info!(
            %repo,
            kind = %payload.kind,
            commit = %payload.commit,
            "triggered run"
        );
        Ok(())
    }
}
