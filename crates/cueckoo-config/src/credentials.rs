//! GitHub credential lookup.
//!
//! Credentials come from the environment first and then from the user's git
//! credential helper, the same place `git push` over HTTPS would look.

use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::{ConfigError, ConfigResult};

/// Environment variable holding the GitHub username.
pub const GITHUB_USER_VAR: &str = "GITHUB_USER";

/// Environment variable holding the GitHub personal access token.
pub const GITHUB_PAT_VAR: &str = "GITHUB_PAT";

/// A GitHub username and personal access token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// GitHub username.
    pub user: String,

    /// Personal access token (classic, `repo` scope).
    pub token: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Creates new credentials.
    #[must_use]
    pub fn new(user: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            token: token.into(),
        }
    }

    /// Looks up credentials from the environment, then the git credential
    /// helper for `host`.
    ///
    /// Returns `None` when neither source has any.
    pub fn discover(host: &str) -> Option<Self> {
        if let Some(creds) = Self::from_lookup(|key| std::env::var(key).ok()) {
            debug!(user = %creds.user, "using GitHub credentials from environment");
            return Some(creds);
        }
        Self::from_git_credential_helper(host)
    }

    /// Like [`Credentials::discover`], but absence is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] if nothing is configured.
    pub fn require(host: &str) -> ConfigResult<Self> {
        Self::discover(host).ok_or(ConfigError::MissingCredentials)
    }

    /// Reads credentials through `lookup`, keyed by environment variable name.
    ///
    /// Both variables must be present and non-empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let user = lookup(GITHUB_USER_VAR).filter(|v| !v.is_empty())?;
        let token = lookup(GITHUB_PAT_VAR).filter(|v| !v.is_empty())?;
        Some(Self::new(user, token))
    }

    /// Asks `git credential fill` for credentials for `https://{host}`.
    ///
    /// Any failure of the helper is treated as "no credentials" so that
    /// anonymous use keeps working.
    pub fn from_git_credential_helper(host: &str) -> Option<Self> {
        let mut command = Command::new("git");
        command
            .args(["credential", "fill"])
            .env("GIT_TERMINAL_PROMPT", "0")
            .env_remove("GIT_ASKPASS")
            .env_remove("SSH_ASKPASS");
        query_helper(&mut command, host)
    }
}

/// Runs a helper speaking the git credential protocol and reads its answer.
fn query_helper(command: &mut Command, host: &str) -> Option<Credentials> {
    let child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn();

    let mut child = match child {
        Ok(child) => child,
        Err(e) => {
            debug!(error = %e, "credential helper not available");
            return None;
        }
    };

    // The helper may exit before reading its request
    if let Some(mut stdin) = child.stdin.take()
        && let Err(e) = write!(stdin, "protocol=https\nhost={host}\n\n")
    {
        debug!(error = %e, "failed to send request to credential helper");
    }

    let output = match child.wait_with_output() {
        Ok(output) => output,
        Err(e) => {
            debug!(error = %e, "failed to read credential helper output");
            return None;
        }
    };
    if !output.status.success() {
        debug!(status = %output.status, "credential helper returned no credentials");
        return None;
    }

    parse_credential_output(&String::from_utf8_lossy(&output.stdout))
}

/// Parses the `key=value` lines printed by `git credential fill`.
fn parse_credential_output(output: &str) -> Option<Credentials> {
    let mut user = None;
    let mut token = None;

    for line in output.lines() {
        match line.split_once('=') {
            Some(("username", value)) if !value.is_empty() => user = Some(value.to_string()),
            Some(("password", value)) if !value.is_empty() => token = Some(value.to_string()),
            _ => {}
        }
    }

    Some(Credentials::new(user?, token?))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_both_set() {
        let creds =
            Credentials::from_lookup(lookup_from(&[("GITHUB_USER", "alice"), ("GITHUB_PAT", "t0k")]))
                .unwrap();
        assert_eq!(creds, Credentials::new("alice", "t0k"));
    }

    #[test]
    fn test_from_lookup_missing_token() {
        let creds = Credentials::from_lookup(lookup_from(&[("GITHUB_USER", "alice")]));
        assert!(creds.is_none());
    }

    #[test]
    fn test_from_lookup_empty_user() {
        let creds =
            Credentials::from_lookup(lookup_from(&[("GITHUB_USER", ""), ("GITHUB_PAT", "t0k")]));
        assert!(creds.is_none());
    }

    #[test]
    fn test_parse_credential_output() {
        let output = "protocol=https\nhost=github.com\nusername=bob\npassword=secret\n";
        let creds = parse_credential_output(output).unwrap();
        assert_eq!(creds.user, "bob");
        assert_eq!(creds.token, "secret");
    }

    #[test]
    fn test_parse_credential_output_password_with_equals() {
        let output = "username=bob\npassword=a=b=c\n";
        let creds = parse_credential_output(output).unwrap();
        assert_eq!(creds.token, "a=b=c");
    }

    #[test]
    fn test_parse_credential_output_no_password() {
        let output = "protocol=https\nhost=github.com\nusername=bob\n";
        assert!(parse_credential_output(output).is_none());
    }

    #[cfg(unix)]
    fn shell(script: &str) -> Command {
        let mut command = Command::new("sh");
        command.args(["-c", script]);
        command
    }

    #[cfg(unix)]
    #[test]
    fn test_query_helper_forwards_host() {
        let mut command = shell(r#"sed -n 's/^host=/username=/p'; echo password=secret"#);
        let creds = query_helper(&mut command, "ghe.example.com").unwrap();
        assert_eq!(creds, Credentials::new("ghe.example.com", "secret"));
    }

    #[cfg(unix)]
    #[test]
    fn test_query_helper_failure_means_no_credentials() {
        assert!(query_helper(&mut shell("exit 1"), "github.com").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_query_helper_closed_stdin_means_no_credentials() {
        let mut command = shell("exec 0<&-; exit 0");
        assert!(query_helper(&mut command, "github.com").is_none());
    }

    #[test]
    fn test_query_helper_missing_program() {
        let mut command = Command::new("cueckoo-no-such-credential-helper");
        assert!(query_helper(&mut command, "github.com").is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let creds = Credentials::new("alice", "super-secret");
        let debug = format!("{creds:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("super-secret"));
    }
}
