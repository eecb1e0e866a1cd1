//! Commit type as read from the local Git repository.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static CHANGE_ID_TRAILER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^Change-Id:[ \t]*(I[0-9a-f]{40})[ \t]*$").expect("valid change-id regex")
});

/// Returns true if `s` looks like a Gerrit change ID (`I` + 40 hex digits).
#[must_use]
pub fn is_change_id(s: &str) -> bool {
    s.len() == 41
        && s.starts_with('I')
        && s[1..]
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// A commit as read from the local repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalCommit {
    /// The commit hash (SHA).
    pub hash: String,

    /// The full commit message (subject + body).
    pub message: String,
}

impl LocalCommit {
    /// Creates a new local commit.
    #[must_use]
    pub fn new(hash: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            message: message.into(),
        }
    }

    /// Returns the first line of the commit message (the subject).
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Returns the short hash (first 7 characters).
    #[must_use]
    pub fn short_hash(&self) -> &str {
        &self.hash[..7.min(self.hash.len())]
    }

    /// Returns the Gerrit change ID from the `Change-Id:` trailer.
    ///
    /// When the trailer appears more than once the last one wins, matching
    /// how Gerrit reads the footer.
    #[must_use]
    pub fn change_id(&self) -> Option<&str> {
        CHANGE_ID_TRAILER
            .captures_iter(&self.message)
            .last()
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHANGE_ID: &str = "I0123456789abcdef0123456789abcdef01234567";

    fn make_commit(hash: &str, message: &str) -> LocalCommit {
        LocalCommit::new(hash, message)
    }

    #[test]
    fn test_new() {
        let commit = LocalCommit::new("abc1234567890", "cmd/cue: fix flag");

        assert_eq!(commit.hash, "abc1234567890");
        assert_eq!(commit.message, "cmd/cue: fix flag");
    }

    #[test]
    fn test_subject() {
        let commit = make_commit("abc", "cue: add builtin\n\nThis is the body");
        assert_eq!(commit.subject(), "cue: add builtin");
    }

    #[test]
    fn test_subject_empty() {
        let commit = make_commit("abc", "");
        assert_eq!(commit.subject(), "");
    }

    #[test]
    fn test_short_hash() {
        let commit = make_commit("abc1234567890", "message");
        assert_eq!(commit.short_hash(), "abc1234");
    }

    #[test]
    fn test_short_hash_less_than_7() {
        let commit = make_commit("abc", "message");
        assert_eq!(commit.short_hash(), "abc");
    }

    #[test]
    fn test_change_id_trailer() {
        let message = format!("cue: fix\n\nSome body.\n\nChange-Id: {CHANGE_ID}\n");
        let commit = make_commit("abc", &message);
        assert_eq!(commit.change_id(), Some(CHANGE_ID));
    }

    #[test]
    fn test_change_id_with_other_trailers() {
        let message = format!(
            "cue: fix\n\nSigned-off-by: A <a@example.com>\nChange-Id: {CHANGE_ID}\nReviewed-on: x"
        );
        let commit = make_commit("abc", &message);
        assert_eq!(commit.change_id(), Some(CHANGE_ID));
    }

    #[test]
    fn test_change_id_last_wins() {
        let other = "Iffffffffffffffffffffffffffffffffffffffff";
        let message = format!("subject\n\nChange-Id: {other}\n\nChange-Id: {CHANGE_ID}");
        let commit = make_commit("abc", &message);
        assert_eq!(commit.change_id(), Some(CHANGE_ID));
    }

    #[test]
    fn test_change_id_missing() {
        let commit = make_commit("abc", "subject\n\nno trailer here");
        assert!(commit.change_id().is_none());
    }

    #[test]
    fn test_change_id_not_in_subject_mid_line() {
        let commit = make_commit("abc", &format!("mentions Change-Id: {CHANGE_ID} inline"));
        assert!(commit.change_id().is_none());
    }

    #[test]
    fn test_is_change_id() {
        assert!(is_change_id(CHANGE_ID));
        assert!(!is_change_id("HEAD"));
        assert!(!is_change_id("0123456789abcdef0123456789abcdef01234567"));
        assert!(!is_change_id("I0123456789ABCDEF0123456789abcdef01234567"));
        assert!(!is_change_id("I0123"));
    }

    #[test]
    fn test_serialize_deserialize() {
        let commit = make_commit("abc123", "test message");
        let json = serde_json::to_string(&commit).unwrap();
        let deserialized: LocalCommit = serde_json::from_str(&json).unwrap();
        assert_eq!(commit, deserialized);
    }
}
