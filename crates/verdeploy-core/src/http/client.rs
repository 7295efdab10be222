//! GitHub REST API client for commit lookups and deployment comments

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::traits::RepositoryApi;
use crate::types::RepoSlug;

/// Default REST endpoint, overridden by `GITHUB_API_URL` on GHES runners
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub API response for a git commit object
#[derive(Debug, Deserialize)]
struct GitHubCommit {
    #[allow(dead_code)]
    sha: String,
    message: String,
    author: Option<GitHubCommitAuthor>,
}

#[derive(Debug, Deserialize)]
struct GitHubCommitAuthor {
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    body: &'a str,
}

/// Commit metadata the action needs for a pull request head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitDetails {
    /// Full commit message
    pub message: String,
    /// Git author name, when recorded
    pub author_name: Option<String>,
}

/// GitHub API client
pub struct GitHubApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for GitHubApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl GitHubApiClient {
    /// Create a new GitHub API client
    pub fn new(base_url: String, token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("verdeploy/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// API base URL, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        match self.token {
            Some(ref token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn post_comment(&self, url: String, body: &str) -> Result<()> {
        let response = self
            .authorize(self.client.post(&url))
            .json(&CommentRequest { body })
            .send()
            .await
            .map_err(|e| Error::Http(format!("GitHub API request failed: {}", e)))?;

        check_status(&response)?;
        Ok(())
    }
}

/// Map a non-success response to an error, detecting rate limiting
fn check_status(response: &reqwest::Response) -> Result<()> {
    let status = response.status();
    if status == reqwest::StatusCode::FORBIDDEN || status == reqwest::StatusCode::TOO_MANY_REQUESTS
    {
        let remaining = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok());

        if remaining == Some("0") || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimitExceeded(format!(
                "GitHub API rate limit exceeded ({})",
                status
            )));
        }
    }

    if !status.is_success() {
        return Err(Error::Http(format!(
            "GitHub API returned error: {} for {}",
            status,
            response.url().path()
        )));
    }

    Ok(())
}

impl RepositoryApi for GitHubApiClient {
    fn get_commit<'a>(
        &'a self,
        repo: &'a RepoSlug,
        sha: &'a str,
    ) -> impl Future<Output = Result<CommitDetails>> + Send + 'a {
        async move {
            let url = format!(
                "{}/repos/{}/{}/git/commits/{}",
                self.base_url, repo.owner, repo.name, sha
            );

            let response = self
                .authorize(self.client.get(&url))
                .send()
                .await
                .map_err(|e| Error::Http(format!("GitHub API request failed: {}", e)))?;

            check_status(&response)?;

            let commit: GitHubCommit = response
                .json()
                .await
                .map_err(|e| Error::Http(format!("Failed to parse GitHub API response: {}", e)))?;

            Ok(CommitDetails {
                message: commit.message,
                author_name: commit.author.and_then(|a| a.name),
            })
        }
    }

    fn create_commit_comment<'a>(
        &'a self,
        repo: &'a RepoSlug,
        sha: &'a str,
        body: &'a str,
    ) -> impl Future<Output = Result<()>> + Send + 'a {
        let url = format!(
            "{}/repos/{}/{}/commits/{}/comments",
            self.base_url, repo.owner, repo.name, sha
        );
        self.post_comment(url, body)
    }

    fn create_issue_comment<'a>(
        &'a self,
        repo: &'a RepoSlug,
        issue_number: u64,
        body: &'a str,
    ) -> impl Future<Output = Result<()>> + Send + 'a {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.base_url, repo.owner, repo.name, issue_number
        );
        self.post_comment(url, body)
    }
}
