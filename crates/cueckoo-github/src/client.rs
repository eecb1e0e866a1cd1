//! Blocking GitHub REST client.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, LINK};
use tracing::debug;

use crate::link::last_page_from_link;
use crate::types::{CompareResponse, ErrorBody};
use crate::{ComparePage, DispatchRequest, GithubError, GithubResult, RepoId};

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";

/// The GitHub operations cueckoo relies on.
pub trait GithubApi {
    /// Fetches one page of the commits reachable from `head` but not `base`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status or an
    /// undecodable body.
    fn compare_commits(
        &self,
        repo: &RepoId,
        base: &str,
        head: &str,
        page: u32,
    ) -> GithubResult<ComparePage>;

    /// Sends a `repository_dispatch` event.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status.
    fn repository_dispatch(&self, repo: &RepoId, request: &DispatchRequest) -> GithubResult<()>;
}

/// GitHub REST client backed by `reqwest`'s blocking client.
pub struct GithubClient {
    http: Client,
    api_url: Url,
    auth: Option<(String, String)>,
}

impl GithubClient {
    /// Creates a client for the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `api_url` is not an absolute URL or the HTTP
    /// client cannot be built.
    pub fn new(api_url: &str, timeout: Duration) -> GithubResult<Self> {
        let api_url = Url::parse(api_url)
            .map_err(|e| GithubError::InvalidUrl(format!("{api_url}: {e}")))?;
        if api_url.cannot_be_a_base() {
            return Err(GithubError::InvalidUrl(api_url.to_string()));
        }

        let http = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(timeout)
            .build()
            .map_err(GithubError::Client)?;

        Ok(Self {
            http,
            api_url,
            auth: None,
        })
    }

    /// Authenticates requests with a username and personal access token.
    #[must_use]
    pub fn with_basic_auth(mut self, user: impl Into<String>, token: impl Into<String>) -> Self {
        self.auth = Some((user.into(), token.into()));
        self
    }

    /// Returns whether requests are authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn api_url(&self) -> &str {
        self.api_url.as_str().trim_end_matches('/')
    }

    /// Returns the host to ask a git credential helper about.
    ///
    /// `api.github.com` maps to `github.com`; Enterprise hosts serve the API
    /// under `/api/v3` and are returned unchanged.
    #[must_use]
    pub fn credential_host(&self) -> String {
        let host = self.api_url.host_str().unwrap_or_default();
        let host = host.strip_prefix("api.").unwrap_or(host);
        match self.api_url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    /// Builds `{api}/repos/{owner}/{repo}/{segments...}`, percent-encoding
    /// each segment.
    fn repo_url(&self, repo: &RepoId, segments: &[&str]) -> GithubResult<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| GithubError::InvalidUrl(self.api_url.to_string()))?
            .pop_if_empty()
            .extend(["repos", repo.owner.as_str(), repo.repo.as_str()])
            .extend(segments);
        Ok(url)
    }

    fn prepare(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        match &self.auth {
            Some((user, token)) => request.basic_auth(user, Some(token)),
            None => request,
        }
    }

    fn send(&self, request: RequestBuilder, url: &Url) -> GithubResult<Response> {
        let response = self
            .prepare(request)
            .send()
            .map_err(|source| GithubError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        Err(GithubError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            message,
        })
    }
}

impl GithubApi for GithubClient {
    fn compare_commits(
        &self,
        repo: &RepoId,
        base: &str,
        head: &str,
        page: u32,
    ) -> GithubResult<ComparePage> {
        let basehead = format!("{base}...{head}");
        let url = self.repo_url(repo, &["compare", basehead.as_str()])?;
        debug!(%url, page, "comparing commits");

        let request = self.http.get(url.clone()).query(&[("page", page)]);
        let response = self.send(request, &url)?;

        let last_page = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .map_or(0, last_page_from_link);

        let body: CompareResponse = response.json().map_err(|source| GithubError::Decode {
            url: url.to_string(),
            source,
        })?;

        Ok(ComparePage {
            commits: body.commits.into_iter().map(Into::into).collect(),
            last_page,
        })
    }

    fn repository_dispatch(&self, repo: &RepoId, request: &DispatchRequest) -> GithubResult<()> {
        let url = self.repo_url(repo, &["dispatches"])?;
        debug!(%url, event_type = %request.event_type, "sending repository dispatch");

        self.send(self.http.post(url.clone()).json(request), &url)?;
        Ok(())
    }
}
