//! Configuration schema.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Main repository on GitHub.
    #[serde(default)]
    pub github: GithubConfig,

    /// Companion (unity) repository.
    #[serde(default)]
    pub unity: UnityConfig,

    /// Local git settings.
    #[serde(default)]
    pub git: GitConfig,
}

impl Config {
    /// Checks values that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is empty.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.github.owner.is_empty() || self.github.repo.is_empty() {
            return Err(ConfigError::Invalid(
                "github.owner and github.repo must not be empty".to_string(),
            ));
        }
        if self.github.api_url.is_empty() {
            return Err(ConfigError::Invalid(
                "github.api_url must not be empty".to_string(),
            ));
        }
        if self.unity.is_enabled() && self.unity.owner.is_empty() {
            return Err(ConfigError::Invalid(
                "unity.owner must be set when unity.repo is".to_string(),
            ));
        }
        Ok(())
    }
}

/// GitHub repository configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Repository owner (user or organisation).
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Repository name.
    #[serde(default = "default_repo")]
    pub repo: String,

    /// Base URL of the REST API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            repo: default_repo(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_owner() -> String {
    "cue-lang".to_string()
}

fn default_repo() -> String {
    "cue".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Unity repository configuration.
///
/// An empty `repo` disables unity runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnityConfig {
    /// Repository owner.
    #[serde(default = "default_unity_owner")]
    pub owner: String,

    /// Repository name.
    #[serde(default = "default_unity_repo")]
    pub repo: String,
}

impl UnityConfig {
    /// Returns whether unity runs should be triggered.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.repo.is_empty()
    }
}

impl Default for UnityConfig {
    fn default() -> Self {
        Self {
            owner: default_unity_owner(),
            repo: default_unity_repo(),
        }
    }
}

fn default_unity_owner() -> String {
    "cue-unity".to_string()
}

fn default_unity_repo() -> String {
    "unity".to_string()
}

/// Local git configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// Remote that tracks the main repository.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Branch that changes are proposed against.
    #[serde(default = "default_branch")]
    pub branch: String,
}

impl GitConfig {
    /// Returns the upstream ref, e.g. `origin/master`.
    #[must_use]
    pub fn upstream(&self) -> String {
        format!("{}/{}", self.remote, self.branch)
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            branch: default_branch(),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "master".to_string()
}
