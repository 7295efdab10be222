//! Webhook payload subset read from `GITHUB_EVENT_PATH`
//!
//! Only the fields the action consumes are modelled; everything else in the
//! payload is ignored by serde.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Event payload for `push` and `pull_request` events
#[derive(Debug, Default, Clone, Deserialize)]
pub struct EventPayload {
    /// Pushed ref (`refs/heads/<branch>`), push events only
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    /// SHA the ref points to after the push
    pub after: Option<String>,
    /// Most recent commit of the push; `null` for branch deletions
    pub head_commit: Option<HeadCommit>,
    /// Pull request object, pull_request events only
    pub pull_request: Option<PullRequest>,
    /// Issue object, issue-related events only
    pub issue: Option<Issue>,
    /// Top-level issue / pull request number
    pub number: Option<u64>,
    /// Repository the event belongs to
    pub repository: Option<Repository>,
}

/// `head_commit` of a push payload
#[derive(Debug, Clone, Deserialize)]
pub struct HeadCommit {
    /// Commit SHA
    pub id: Option<String>,
    /// Commit message
    pub message: String,
    /// Commit author
    #[serde(default)]
    pub author: CommitAuthor,
}

/// Author block of a push commit
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CommitAuthor {
    /// Git author name
    pub name: Option<String>,
    /// GitHub login, absent when the email is not linked to an account
    pub username: Option<String>,
}

/// `pull_request` object
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// Pull request number
    pub number: Option<u64>,
    /// Head branch of the pull request
    pub head: PullRequestHead,
    /// User who opened the pull request
    pub user: Option<User>,
}

/// Head of a pull request
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestHead {
    /// Branch name
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Head commit SHA
    pub sha: String,
}

/// GitHub account
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// Account login
    pub login: String,
}

/// `issue` object
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    /// Issue number
    pub number: u64,
}

/// `repository` object
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    /// `owner/name`
    pub full_name: String,
}

impl EventPayload {
    /// Parse a payload from JSON text
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::EventParse(format!("Invalid event payload: {}", e)))
    }

    /// Read and parse the payload file written by the runner
    pub async fn from_path(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::EventParse(format!(
                "Cannot read event payload {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&json)
    }

    /// Issue or pull request number the run is attached to.
    ///
    /// Checked in the order `issue.number`, `pull_request.number`, `number`.
    pub fn issue_number(&self) -> Option<u64> {
        self.issue
            .as_ref()
            .map(|i| i.number)
            .or_else(|| self.pull_request.as_ref().and_then(|pr| pr.number))
            .or(self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUSH: &str = r#"{
        "ref": "refs/heads/main",
        "before": "000",
        "after": "abc123",
        "repository": {"full_name": "octo/site", "private": false},
        "head_commit": {
            "id": "abc123",
            "message": "fix bug",
            "author": {"name": "Octo Cat", "email": "o@example.com", "username": "octocat"}
        }
    }"#;

    const PULL_REQUEST: &str = r#"{
        "action": "synchronize",
        "number": 42,
        "pull_request": {
            "number": 42,
            "head": {"ref": "feature/x", "sha": "def456", "label": "octo:feature/x"},
            "user": {"login": "contributor"}
        },
        "repository": {"full_name": "octo/site"}
    }"#;

    #[test]
    fn test_parse_push_payload() {
        let payload = EventPayload::parse(PUSH).unwrap();
        assert_eq!(payload.git_ref.as_deref(), Some("refs/heads/main"));
        let head = payload.head_commit.as_ref().unwrap();
        assert_eq!(head.id.as_deref(), Some("abc123"));
        assert_eq!(head.message, "fix bug");
        assert_eq!(head.author.username.as_deref(), Some("octocat"));
        assert_eq!(payload.issue_number(), None);
    }

    #[test]
    fn test_parse_pull_request_payload() {
        let payload = EventPayload::parse(PULL_REQUEST).unwrap();
        let pr = payload.pull_request.as_ref().unwrap();
        assert_eq!(pr.head.git_ref, "feature/x");
        assert_eq!(pr.head.sha, "def456");
        assert_eq!(payload.issue_number(), Some(42));
    }

    #[test]
    fn test_issue_number_precedence() {
        let payload = EventPayload::parse(
            r#"{"issue": {"number": 7}, "pull_request": {"number": 8, "head": {"ref": "b", "sha": "s"}}, "number": 9}"#,
        )
        .unwrap();
        assert_eq!(payload.issue_number(), Some(7));

        let payload = EventPayload::parse(r#"{"number": 9}"#).unwrap();
        assert_eq!(payload.issue_number(), Some(9));
    }

    #[test]
    fn test_branch_deletion_has_no_head_commit() {
        let payload =
            EventPayload::parse(r#"{"ref": "refs/heads/gone", "deleted": true, "head_commit": null}"#)
                .unwrap();
        assert!(payload.head_commit.is_none());
    }

    #[test]
    fn test_invalid_json_is_event_parse_error() {
        let result = EventPayload::parse("{not json");
        assert!(matches!(result, Err(Error::EventParse(_))));
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("event.json");
        std::fs::write(&path, PUSH).unwrap();

        let payload = EventPayload::from_path(&path).await.unwrap();
        assert_eq!(payload.repository.unwrap().full_name, "octo/site");
    }

    #[tokio::test]
    async fn test_from_missing_path() {
        let result = EventPayload::from_path(Path::new("/nonexistent/event.json")).await;
        assert!(matches!(result, Err(Error::EventParse(_))));
    }
}
