//! Trait seams for the external collaborators
//!
//! Both traits return `impl Future` so implementations are resolved at compile
//! time: no boxing, no dynamic dispatch.

use std::future::Future;

use crate::error::Result;
use crate::http::CommitDetails;
use crate::process::{CommandSpec, ProcessOutput};
use crate::types::RepoSlug;

/// Launches subprocesses
pub trait CommandRunner {
    /// Run `command` to completion.
    ///
    /// Output lines are logged as they arrive. A non-zero exit resolves to
    /// [`crate::Error::ProcessFailed`].
    fn run<'a>(&'a self, command: &'a CommandSpec)
        -> impl Future<Output = Result<ProcessOutput>> + Send + 'a;
}

/// The subset of the GitHub REST API the action talks to
pub trait RepositoryApi {
    /// Fetch a git commit object by SHA
    fn get_commit<'a>(
        &'a self,
        repo: &'a RepoSlug,
        sha: &'a str,
    ) -> impl Future<Output = Result<CommitDetails>> + Send + 'a;

    /// Comment on a commit
    fn create_commit_comment<'a>(
        &'a self,
        repo: &'a RepoSlug,
        sha: &'a str,
        body: &'a str,
    ) -> impl Future<Output = Result<()>> + Send + 'a;

    /// Comment on an issue or pull request
    fn create_issue_comment<'a>(
        &'a self,
        repo: &'a RepoSlug,
        issue_number: u64,
        body: &'a str,
    ) -> impl Future<Output = Result<()>> + Send + 'a;
}
