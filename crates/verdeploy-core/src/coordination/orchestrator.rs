//! Single-shot deployment orchestration
//!
//! Steps run strictly in order, each awaited before the next:
//!
//! 1. resolve the trigger context
//! 2. build (when enabled)
//! 3. export the Vercel scoping variables
//! 4. deploy
//! 5. assign the custom domain (when configured, never fatal)
//! 6. comment on the commit or pull request

use crate::error::Result;
use crate::event::{resolve_trigger, TriggerSource};
use crate::steps::{alias, build, deploy, env, notify};
use crate::traits::{CommandRunner, RepositoryApi};
use crate::types::{AliasStatus, InputConfig, RunReport};

/// Sequences every step of a run over borrowed collaborators
pub struct DeploymentOrchestrator<'a, R, A> {
    runner: &'a R,
    api: &'a A,
    config: &'a InputConfig<'a>,
}

impl<'a, R, A> DeploymentOrchestrator<'a, R, A>
where
    R: CommandRunner,
    A: RepositoryApi,
{
    /// Create an orchestrator
    pub fn new(runner: &'a R, api: &'a A, config: &'a InputConfig<'a>) -> Self {
        Self {
            runner,
            api,
            config,
        }
    }

    /// Execute the run. The first fatal error aborts it; nothing already
    /// deployed is rolled back.
    pub async fn run(&self, source: &TriggerSource) -> Result<RunReport> {
        tracing::info!("--- start ---");

        let trigger = resolve_trigger(self.api, source).await?;

        if self.config.build {
            build::build_static(self.runner, self.config).await?;
        }

        let vars = env::vercel_env(self.config);
        let deployment = deploy::deploy(self.runner, self.config, &trigger, &vars).await?;
        let url = deployment.url();

        let alias = match self.config.assign_domain.as_deref() {
            Some(domain) => {
                let vars = env::vercel_env(self.config);
                alias::assign_domain(self.runner, self.config, url, domain, &vars).await
            }
            None => AliasStatus::Skipped,
        };

        let comment = notify::notify(self.api, &trigger, url).await?;

        tracing::info!("---- end ----");
        Ok(RunReport {
            trigger,
            deployment,
            alias,
            comment,
        })
    }
}
