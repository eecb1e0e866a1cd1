//! Subcommands.

pub mod releaselog;
pub mod runtrybot;

use std::time::Duration;

use anyhow::{Context, Result};
use cueckoo_config::Config;
use cueckoo_github::{GithubClient, RepoId};

/// Builds the unauthenticated GitHub client shared by a command run.
fn github_client(config: &Config) -> Result<GithubClient> {
    GithubClient::new(
        &config.github.api_url,
        Duration::from_secs(config.github.timeout_secs),
    )
    .context("failed to create GitHub client")
}

/// Returns the main repository from the configuration.
fn main_repo(config: &Config) -> RepoId {
    RepoId::new(&config.github.owner, &config.github.repo)
}
