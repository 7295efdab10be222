//! Vercel deployment

use crate::error::{Error, Result};
use crate::output::commands::{self, GroupGuard};
use crate::process::CommandSpec;
use crate::steps::env::EnvOverrides;
use crate::steps::{source_dir, PACKAGE_RUNNER};
use crate::traits::CommandRunner;
use crate::types::{DeploymentOutcome, InputConfig, TriggerContext};

/// `-m key=value` deployment metadata, in the order Vercel's Git
/// integration writes it
pub fn deployment_metadata(trigger: &TriggerContext) -> Vec<(&'static str, String)> {
    vec![
        ("githubDeployment", "1".to_string()),
        ("githubRepo", trigger.repository.to_string()),
        ("githubCommitRef", trigger.git_ref.clone()),
        ("githubCommitSha", trigger.commit_sha.clone()),
        ("githubCommitMessage", trigger.commit_message.clone()),
        ("githubCommitAuthorLogin", trigger.author_username.clone()),
        ("githubCommitAuthorName", trigger.author_display_name.clone()),
    ]
}

/// Full deploy command for the deploy source directory
pub fn deploy_command(
    config: &InputConfig<'_>,
    trigger: &TriggerContext,
    env: &EnvOverrides,
) -> CommandSpec {
    let mut cmd = CommandSpec::new(PACKAGE_RUNNER)
        .args(["vercel", "--token"])
        .secret_arg(config.vercel_token.to_string());

    for (key, value) in deployment_metadata(trigger) {
        cmd = cmd.arg("-m").arg(format!("{}={}", key, value));
    }

    cmd.current_dir(source_dir(&config.deploy_source))
        .envs(env.iter())
}

/// Deploy and capture the CLI's stdout.
///
/// A non-zero exit, or stdout without any non-empty line, aborts the run.
pub async fn deploy<R>(
    runner: &R,
    config: &InputConfig<'_>,
    trigger: &TriggerContext,
    env: &EnvOverrides,
) -> Result<DeploymentOutcome>
where
    R: CommandRunner,
{
    tracing::info!("[Deploy starts]");
    let command = deploy_command(config, trigger, env);
    if let Some(dir) = &command.working_dir {
        tracing::info!("Deployment directory is at : {}", dir.display());
    }

    let output = {
        let _group = GroupGuard::open("Deploy");
        runner.run(&command).await?
    };

    let outcome = DeploymentOutcome::from_stdout(output.stdout)
        .ok_or_else(|| Error::Deploy("vercel produced no deployment URL".to_string()))?;
    let url = outcome.url();

    if !looks_like_url(url) {
        let warning = format!("Deployment URL does not look like a URL: {}", url);
        tracing::warn!("{}", warning);
        commands::warning(&warning);
    }

    tracing::info!(url, "[Deploy ends]");
    Ok(outcome)
}

fn looks_like_url(s: &str) -> bool {
    (s.starts_with("https://") || s.starts_with("http://")) && !s.contains(char::is_whitespace)
}
