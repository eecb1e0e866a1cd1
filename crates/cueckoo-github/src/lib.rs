//! Minimal GitHub REST API client for cueckoo.
//!
//! Only the two endpoints the commands need are covered:
//! - `GET /repos/{owner}/{repo}/compare/{base}...{head}` (paginated)
//! - `POST /repos/{owner}/{repo}/dispatches`
//!
//! Callers depend on the [`GithubApi`] trait so tests can substitute a fake.

mod client;
mod error;
mod link;
mod types;

pub use client::{DEFAULT_API_URL, GithubApi, GithubClient};
pub use error::{GithubError, GithubResult};
pub use link::last_page_from_link;
pub use types::{ComparePage, DispatchRequest, RepoId};
