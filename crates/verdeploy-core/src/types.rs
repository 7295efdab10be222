//! Core type definitions shared by every step

use std::borrow::Cow;
use std::fmt;

use crate::error::{Error, Result};

/// Trigger event kind that started the workflow run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Direct push to a branch
    Push,
    /// Pull request opened or updated
    PullRequest,
}

impl EventKind {
    /// Parse a `GITHUB_EVENT_NAME` value.
    ///
    /// Anything other than `push` or `pull_request` is rejected so that no step
    /// ever runs with an unset ref or SHA.
    pub fn from_event_name(name: &str) -> Result<Self> {
        match name {
            "push" => Ok(Self::Push),
            "pull_request" => Ok(Self::PullRequest),
            other => Err(Error::UnsupportedEvent(other.to_string())),
        }
    }

    /// Event name as GitHub spells it
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::PullRequest => "pull_request",
        }
    }
}

/// Repository coordinates (`owner/name`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    /// Account or organization owning the repository
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoSlug {
    /// Parse `owner/name`
    pub fn parse(full_name: &str) -> Result<Self> {
        match full_name.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(Error::Config(format!(
                "Invalid repository format: {}",
                full_name
            ))),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Everything the steps need to know about the triggering commit.
///
/// Built once by [`crate::event::resolve_trigger`] and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerContext {
    /// Push or pull request
    pub event_kind: EventKind,
    /// Branch name, without the `refs/heads/` prefix
    pub git_ref: String,
    /// Head commit SHA
    pub commit_sha: String,
    /// Head commit message
    pub commit_message: String,
    /// Repository the workflow runs in
    pub repository: RepoSlug,
    /// Login of the commit author
    pub author_username: String,
    /// Display name of the commit author
    pub author_display_name: String,
    /// Issue or pull request number, absent for plain pushes
    pub issue_number: Option<u64>,
}

/// Immutable run configuration read once at start-up.
///
/// Optional inputs that are absent disable the step depending on them.
#[derive(Debug, Clone)]
pub struct InputConfig<'a> {
    // Vercel
    /// Token passed to every `vercel` invocation
    pub vercel_token: Cow<'a, str>,
    /// Exported as `VERCEL_ORG_ID` when set
    pub vercel_org_id: Option<Cow<'a, str>>,
    /// Exported as `VERCEL_PROJECT_ID` when set
    pub vercel_project_id: Option<Cow<'a, str>>,

    // GitHub
    /// Token for commit lookups and comments
    pub github_token: Cow<'a, str>,
    /// REST API base URL
    pub api_url: Cow<'a, str>,

    // Build
    /// Run `yarn` and `yarn build` before deploying
    pub build: bool,
    /// Build directory, relative to the workspace
    pub build_source: Cow<'a, str>,

    // Deploy
    /// Deployed directory, relative to the workspace
    pub deploy_source: Cow<'a, str>,
    /// Custom domain aliased to the deployment
    pub assign_domain: Option<Cow<'a, str>>,
}

impl<'a> Default for InputConfig<'a> {
    fn default() -> Self {
        Self {
            vercel_token: Cow::Borrowed(""),
            vercel_org_id: None,
            vercel_project_id: None,
            github_token: Cow::Borrowed(""),
            api_url: Cow::Borrowed("https://api.github.com"),
            build: false,
            build_source: Cow::Borrowed(""),
            deploy_source: Cow::Borrowed(""),
            assign_domain: None,
        }
    }
}

/// Captured result of the deploy command.
///
/// Only constructible from stdout that holds a deployment URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentOutcome {
    stdout: String,
    url: String,
}

impl DeploymentOutcome {
    /// Wrap the deploy command's captured stdout, untouched.
    ///
    /// `None` when stdout has no non-empty line to take the URL from.
    pub fn from_stdout(stdout: String) -> Option<Self> {
        let url = extract_deployment_url(&stdout)?.to_string();
        Some(Self { stdout, url })
    }

    /// Captured stdout, byte-for-byte
    #[inline]
    pub fn raw_stdout(&self) -> &str {
        &self.stdout
    }

    /// Deployment URL: the last non-empty stdout line, trimmed.
    ///
    /// The Vercel CLI prints the URL last; anything printed before it is
    /// diagnostic noise.
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Isolate the last non-empty line of `stdout`
pub fn extract_deployment_url(stdout: &str) -> Option<&str> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
}

/// Result of the domain assignment step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasStatus {
    /// No domain configured
    Skipped,
    /// Domain now points at the deployment
    Assigned(String),
    /// Alias command failed; carries the warning that was logged
    Failed(String),
}

/// Where the deployment comment was posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentTarget {
    /// Comment on an issue or pull request
    Issue(u64),
    /// Comment on a commit
    Commit(String),
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Trigger the run was resolved from
    pub trigger: TriggerContext,
    /// Deploy command output
    pub deployment: DeploymentOutcome,
    /// Domain assignment result
    pub alias: AliasStatus,
    /// Comment that was posted, if any
    pub comment: Option<CommentTarget>,
}

impl RunReport {
    /// Warnings raised during the run
    pub fn warnings(&self) -> Vec<&str> {
        match &self.alias {
            AliasStatus::Failed(warning) => vec![warning.as_str()],
            _ => Vec::new(),
        }
    }
}
