//! Trigger context resolution for push and pull request events

use crate::error::{Error, Result};
use crate::event::payload::EventPayload;
use crate::traits::RepositoryApi;
use crate::types::{EventKind, RepoSlug, TriggerContext};

/// Raw inputs describing the workflow run, as provided by the runner
#[derive(Debug, Clone, Default)]
pub struct TriggerSource {
    /// `GITHUB_EVENT_NAME`
    pub event_name: String,
    /// Parsed `GITHUB_EVENT_PATH` contents
    pub payload: EventPayload,
    /// `GITHUB_REPOSITORY`
    pub repository: Option<String>,
    /// `GITHUB_REF`
    pub git_ref: Option<String>,
    /// `GITHUB_SHA`
    pub sha: Option<String>,
}

/// Strip a leading `refs/heads/` from a ref
pub fn strip_branch_prefix(git_ref: &str) -> &str {
    git_ref.strip_prefix("refs/heads/").unwrap_or(git_ref)
}

impl TriggerSource {
    fn repo_slug(&self) -> Result<RepoSlug> {
        let full_name = self
            .repository
            .as_deref()
            .filter(|r| !r.is_empty())
            .or_else(|| self.payload.repository.as_ref().map(|r| r.full_name.as_str()))
            .ok_or_else(|| Error::Config("GITHUB_REPOSITORY not set".to_string()))?;
        RepoSlug::parse(full_name)
    }
}

/// Build the [`TriggerContext`] for this run.
///
/// Push events are resolved from the payload alone. Pull request events need
/// one `get_commit` call for the head commit's message, since the payload does
/// not carry it. Other events are rejected before anything else happens.
pub async fn resolve_trigger<A>(api: &A, source: &TriggerSource) -> Result<TriggerContext>
where
    A: RepositoryApi,
{
    let event_kind = EventKind::from_event_name(&source.event_name)?;
    let repository = source.repo_slug()?;
    let issue_number = source.payload.issue_number();

    let context = match event_kind {
        EventKind::Push => {
            tracing::info!("Retrieving push metadata");
            let head = source.payload.head_commit.as_ref().ok_or_else(|| {
                Error::EventParse("push payload has no head_commit".to_string())
            })?;

            let git_ref = source
                .payload
                .git_ref
                .as_deref()
                .or(source.git_ref.as_deref())
                .ok_or_else(|| Error::EventParse("push payload has no ref".to_string()))?;

            let commit_sha = head
                .id
                .as_deref()
                .or(source.payload.after.as_deref())
                .or(source.sha.as_deref())
                .ok_or_else(|| Error::EventParse("push payload has no head SHA".to_string()))?;

            TriggerContext {
                event_kind,
                git_ref: strip_branch_prefix(git_ref).to_string(),
                commit_sha: commit_sha.to_string(),
                commit_message: head.message.clone(),
                repository,
                author_username: head.author.username.clone().unwrap_or_default(),
                author_display_name: head.author.name.clone().unwrap_or_default(),
                issue_number,
            }
        }
        EventKind::PullRequest => {
            tracing::info!("Retrieving pull request metadata");
            let pr = source.payload.pull_request.as_ref().ok_or_else(|| {
                Error::EventParse("pull_request payload has no pull_request".to_string())
            })?;

            let commit = api.get_commit(&repository, &pr.head.sha).await?;

            TriggerContext {
                event_kind,
                git_ref: pr.head.git_ref.clone(),
                commit_sha: pr.head.sha.clone(),
                commit_message: commit.message,
                repository,
                author_username: pr.user.as_ref().map(|u| u.login.clone()).unwrap_or_default(),
                author_display_name: commit.author_name.unwrap_or_default(),
                issue_number,
            }
        }
    };

    tracing::debug!(?context, "resolved trigger context");
    Ok(context)
}
