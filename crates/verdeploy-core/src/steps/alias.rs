//! Best-effort custom domain assignment

use crate::output::commands::{self, GroupGuard};
use crate::process::CommandSpec;
use crate::steps::env::EnvOverrides;
use crate::steps::PACKAGE_RUNNER;
use crate::traits::CommandRunner;
use crate::types::{AliasStatus, InputConfig};

/// `vercel alias <deployment> <domain>`
pub fn alias_command(
    config: &InputConfig<'_>,
    deployment_url: &str,
    domain: &str,
    env: &EnvOverrides,
) -> CommandSpec {
    CommandSpec::new(PACKAGE_RUNNER)
        .args(["vercel", "--token"])
        .secret_arg(config.vercel_token.to_string())
        .args(["alias", deployment_url, domain])
        .envs(env.iter())
}

/// Point `domain` at the new deployment.
///
/// Never fails the run: errors are logged as a warning and reported through
/// [`AliasStatus::Failed`].
pub async fn assign_domain<R>(
    runner: &R,
    config: &InputConfig<'_>,
    deployment_url: &str,
    domain: &str,
    env: &EnvOverrides,
) -> AliasStatus
where
    R: CommandRunner,
{
    tracing::info!("[Assign domain starts]");
    let command = alias_command(config, deployment_url, domain, env);

    let result = {
        let _group = GroupGuard::open("Assign domain");
        runner.run(&command).await
    };

    let status = match result {
        Ok(_) => AliasStatus::Assigned(domain.to_string()),
        Err(err) => {
            let warning = format!("Assigning domain failed with error : {}", err);
            tracing::warn!("{}", warning);
            commands::warning(&warning);
            AliasStatus::Failed(warning)
        }
    };

    tracing::info!("[Assign domain ends]");
    status
}
