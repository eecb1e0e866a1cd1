//! GitHub API error types.

use thiserror::Error;

/// GitHub API errors.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// A request URL could not be built.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// The request could not be sent or no response arrived.
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("GitHub returned {status} for {url}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Result type for GitHub API operations.
pub type GithubResult<T> = Result<T, GithubError>;
