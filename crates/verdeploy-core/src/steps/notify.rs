//! Deployment comment on the triggering commit or pull request

use crate::error::Result;
use crate::traits::RepositoryApi;
use crate::types::{CommentTarget, EventKind, TriggerContext};

const ASSETS: &str = "https://raw.githubusercontent.com/xmflsct/action-vercel-deployment/master/src/svgs";
const HOMEPAGE: &str = "https://github.com/xmflsct/action-vercel-deployment";

/// Which subject the footer of the comment names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Subject {
    Commit,
    PullRequest,
}

impl Subject {
    const fn as_str(self) -> &'static str {
        match self {
            Subject::Commit => "This commit",
            Subject::PullRequest => "This pull request",
        }
    }
}

fn render(sha: &str, deployment_url: &str, subject: Subject) -> String {
    [
        format!(r#"<img align="center" width="35" height="35" src="{ASSETS}/vercel.svg">"#),
        format!(
            r#"<img align="left" width="24" height="24" src="{ASSETS}/info.svg"> This commit {sha} is built and deployed to [Vercel](https://vercel.com/)."#
        ),
        format!(
            r#"<img align="left" width="24" height="24" src="{ASSETS}/check-in-circle.svg"> Preview: {deployment_url}"#
        ),
        format!(
            r#"<img align="left" width="24" height="24" src="{ASSETS}/award.svg"> {} has been automatically deployed with [vercel-deployment]({HOMEPAGE})"#,
            subject.as_str()
        ),
    ]
    .join("\r\n\r\n")
}

/// Comment body posted on a commit
pub fn commit_comment_body(sha: &str, deployment_url: &str) -> String {
    render(sha, deployment_url, Subject::Commit)
}

/// Comment body posted on a pull request
pub fn pull_request_comment_body(sha: &str, deployment_url: &str) -> String {
    render(sha, deployment_url, Subject::PullRequest)
}

/// Where the comment goes: the issue / pull request when the run has one,
/// the commit for pushes, nowhere otherwise
pub fn comment_target(trigger: &TriggerContext) -> Option<CommentTarget> {
    match (trigger.issue_number, trigger.event_kind) {
        (Some(number), _) => Some(CommentTarget::Issue(number)),
        (None, EventKind::Push) => Some(CommentTarget::Commit(trigger.commit_sha.clone())),
        (None, _) => None,
    }
}

/// Post the deployment comment. API errors are fatal.
pub async fn notify<A>(
    api: &A,
    trigger: &TriggerContext,
    deployment_url: &str,
) -> Result<Option<CommentTarget>>
where
    A: RepositoryApi,
{
    let target = comment_target(trigger);
    match &target {
        Some(CommentTarget::Issue(number)) => {
            tracing::info!(number, "this is related issue or pull_request");
            let body = pull_request_comment_body(&trigger.commit_sha, deployment_url);
            api.create_issue_comment(&trigger.repository, *number, &body)
                .await?;
        }
        Some(CommentTarget::Commit(sha)) => {
            tracing::info!(%sha, "this is push event");
            let body = commit_comment_body(&trigger.commit_sha, deployment_url);
            api.create_commit_comment(&trigger.repository, sha, &body)
                .await?;
        }
        None => tracing::info!("no commit or pull request to comment on"),
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RepoSlug;

    fn trigger(kind: EventKind, issue_number: Option<u64>) -> TriggerContext {
        TriggerContext {
            event_kind: kind,
            git_ref: "main".into(),
            commit_sha: "abc123".into(),
            commit_message: "fix bug".into(),
            repository: RepoSlug::parse("octo/site").unwrap(),
            author_username: "octocat".into(),
            author_display_name: "Octo Cat".into(),
            issue_number,
        }
    }

    #[test]
    fn test_routing() {
        assert_eq!(
            comment_target(&trigger(EventKind::PullRequest, Some(42))),
            Some(CommentTarget::Issue(42))
        );
        assert_eq!(
            comment_target(&trigger(EventKind::Push, Some(7))),
            Some(CommentTarget::Issue(7))
        );
        assert_eq!(
            comment_target(&trigger(EventKind::Push, None)),
            Some(CommentTarget::Commit("abc123".into()))
        );
        assert_eq!(comment_target(&trigger(EventKind::PullRequest, None)), None);
    }

    #[test]
    fn test_commit_body() {
        let body = commit_comment_body("abc123", "https://site-abc.vercel.app");
        assert!(body.contains("This commit abc123 is built and deployed to [Vercel](https://vercel.com/)."));
        assert!(body.contains("Preview: https://site-abc.vercel.app"));
        assert!(body.contains("This commit has been automatically deployed"));
        assert!(!body.contains("This pull request"));
        assert_eq!(body.matches("\r\n\r\n").count(), 3);
    }

    #[test]
    fn test_pull_request_body() {
        let body = pull_request_comment_body("def456", "https://site-def.vercel.app");
        assert!(body.contains("This commit def456 is built"));
        assert!(body.contains("This pull request has been automatically deployed"));
        assert!(body.starts_with(r#"<img align="center" width="35" height="35""#));
    }
}
