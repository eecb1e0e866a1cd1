//! Configuration management for cueckoo.
//!
//! This crate handles loading the optional `cueckoo.toml` file and looking up
//! GitHub credentials.

mod credentials;
mod error;
mod loader;
mod schema;

pub use credentials::{Credentials, GITHUB_PAT_VAR, GITHUB_USER_VAR};
pub use error::{ConfigError, ConfigResult};
pub use loader::{CONFIG_FILE_NAME, find_and_load_config, find_and_load_config_from, load_config};
pub use schema::{Config, GitConfig, GithubConfig, UnityConfig};
