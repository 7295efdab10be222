//! # verdeploy core
//!
//! Build, deploy and report a static site on Vercel from a GitHub Actions run.
//!
//! A run is a fixed sequence over one trigger (push or pull request):
//! - **Trigger resolution** from the webhook payload, plus one commit lookup
//!   for pull requests
//! - **Build** with `npx yarn` / `npx yarn build` when enabled
//! - **Deploy** with `npx vercel`, annotated with the commit metadata
//! - **Domain assignment** with `npx vercel alias`, best effort
//! - **Notification** as a commit or pull request comment
//!
//! External collaborators sit behind [`traits::CommandRunner`] and
//! [`traits::RepositoryApi`] so the whole sequence runs against fakes in tests.
//!
//! ## Example
//!
//! ```no_run
//! use verdeploy_core::event::{EventPayload, TriggerSource};
//! use verdeploy_core::http::GitHubApiClient;
//! use verdeploy_core::process::TokioCommandRunner;
//! use verdeploy_core::{run_deployment, InputConfig};
//! use std::borrow::Cow;
//!
//! # async fn example() -> verdeploy_core::Result<()> {
//! let config = InputConfig {
//!     vercel_token: Cow::Borrowed("vercel-token"),
//!     deploy_source: Cow::Borrowed("public"),
//!     ..Default::default()
//! };
//! let source = TriggerSource {
//!     event_name: "push".to_string(),
//!     payload: EventPayload::from_path("event.json".as_ref()).await?,
//!     repository: Some("octo/site".to_string()),
//!     ..Default::default()
//! };
//!
//! let api = GitHubApiClient::new(config.api_url.to_string(), None);
//! let report = run_deployment(&TokioCommandRunner::new(), &api, &config, &source).await?;
//! println!("Preview: {}", report.deployment.url());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod coordination;
pub mod error;
pub mod event;
pub mod http;
pub mod output;
pub mod process;
pub mod steps;
pub mod traits;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use types::{
    AliasStatus, CommentTarget, DeploymentOutcome, EventKind, InputConfig, RepoSlug, RunReport,
    TriggerContext,
};

use coordination::DeploymentOrchestrator;
use event::TriggerSource;
use traits::{CommandRunner, RepositoryApi};

/// Run the full build / deploy / alias / notify sequence once.
///
/// Returns a [`RunReport`] on success; the first fatal error otherwise.
pub async fn run_deployment<R, A>(
    runner: &R,
    api: &A,
    config: &InputConfig<'_>,
    source: &TriggerSource,
) -> Result<RunReport>
where
    R: CommandRunner,
    A: RepositoryApi,
{
    DeploymentOrchestrator::new(runner, api, config)
        .run(source)
        .await
}
