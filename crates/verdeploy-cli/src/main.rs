#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::Parser;
use std::borrow::Cow;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use verdeploy_core::event::{EventPayload, TriggerSource};
use verdeploy_core::http::client::DEFAULT_API_URL;
use verdeploy_core::http::GitHubApiClient;
use verdeploy_core::output::{commands, OutputWriter};
use verdeploy_core::process::TokioCommandRunner;
use verdeploy_core::{AliasStatus, InputConfig, RunReport};

#[derive(Parser)]
#[command(
    name = "verdeploy",
    version,
    about = "Build, deploy and report a static site on Vercel"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Deploy the commit that triggered this workflow run
    Deploy(DeployArgs),
}

#[derive(clap::Args)]
struct DeployArgs {
    /// Vercel access token
    #[arg(long, env = "INPUT_VERCELTOKEN", hide_env_values = true)]
    vercel_token: Option<String>,

    /// Vercel team / account id (exported as VERCEL_ORG_ID)
    #[arg(long, env = "INPUT_VERCELORGID")]
    vercel_org_id: Option<String>,

    /// Vercel project id (exported as VERCEL_PROJECT_ID)
    #[arg(long, env = "INPUT_VERCELPROJECTID")]
    vercel_project_id: Option<String>,

    /// GitHub token used to read commits and post comments
    #[arg(long, env = "INPUT_GITHUBTOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Build before deploying; only the literal "true" enables it
    #[arg(long, env = "INPUT_BUILDOPTION")]
    build_option: Option<String>,

    /// Directory the build runs in, relative to the workspace
    #[arg(long, env = "INPUT_BUILDSOURCE")]
    build_source: Option<String>,

    /// Directory deployed to Vercel, relative to the workspace
    #[arg(long, env = "INPUT_DEPLOYSOURCE")]
    deploy_source: Option<String>,

    /// Custom domain aliased to the new deployment
    #[arg(long, env = "INPUT_ASSIGNDOMAIN")]
    assign_domain: Option<String>,

    /// Name of the triggering event
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    event_name: Option<String>,

    /// Path of the webhook payload file
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// Repository in owner/name form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Ref that triggered the run
    #[arg(long, env = "GITHUB_REF")]
    git_ref: Option<String>,

    /// Commit SHA that triggered the run
    #[arg(long, env = "GITHUB_SHA")]
    sha: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Step output file
    #[arg(long, env = "GITHUB_OUTPUT")]
    github_output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();
    let code = match cli.command {
        Commands::Deploy(args) => run_deploy(args),
    };
    std::process::exit(code);
}

/// Plain, uncoloured log lines on stdout, which is what the Actions log shows
fn init_tracing() {
    let default_level = if std::env::var("RUNNER_DEBUG").as_deref() == Ok("1") {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_ansi(false)
        .with_target(false)
        .without_time()
        .init();
}

/// Filter empty string from Option (env vars may produce "" for empty values)
fn clean_opt(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn run_deploy(args: DeployArgs) -> i32 {
    let vercel_token = clean_opt(&args.vercel_token).unwrap_or("");
    let github_token = clean_opt(&args.github_token).unwrap_or("");

    // Registered before any subprocess can echo them
    commands::add_mask(vercel_token);
    commands::add_mask(github_token);

    let config = InputConfig {
        vercel_token: Cow::Borrowed(vercel_token),
        vercel_org_id: clean_opt(&args.vercel_org_id).map(Cow::Borrowed),
        vercel_project_id: clean_opt(&args.vercel_project_id).map(Cow::Borrowed),
        github_token: Cow::Borrowed(github_token),
        api_url: Cow::Borrowed(args.api_url.as_str()),
        build: args.build_option.as_deref() == Some("true"),
        build_source: Cow::Borrowed(clean_opt(&args.build_source).unwrap_or("")),
        deploy_source: Cow::Borrowed(clean_opt(&args.deploy_source).unwrap_or("")),
        assign_domain: clean_opt(&args.assign_domain).map(Cow::Borrowed),
    };

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build();
    let rt = match rt {
        Ok(rt) => rt,
        Err(e) => {
            commands::fail(&verdeploy_core::Error::Runtime(format!(
                "failed to create runtime: {e}"
            )));
            return 1;
        }
    };

    let result = rt.block_on(async {
        let event_name = clean_opt(&args.event_name).ok_or_else(|| {
            verdeploy_core::Error::Config("GITHUB_EVENT_NAME not set".to_string())
        })?;
        let event_path = args.event_path.as_deref().ok_or_else(|| {
            verdeploy_core::Error::Config("GITHUB_EVENT_PATH not set".to_string())
        })?;

        let source = TriggerSource {
            event_name: event_name.to_string(),
            payload: EventPayload::from_path(event_path).await?,
            repository: clean_opt(&args.repository).map(str::to_string),
            git_ref: clean_opt(&args.git_ref).map(str::to_string),
            sha: clean_opt(&args.sha).map(str::to_string),
        };

        let api = GitHubApiClient::new(
            config.api_url.to_string(),
            Some(config.github_token.to_string()),
        );
        let runner = TokioCommandRunner::new();

        verdeploy_core::run_deployment(&runner, &api, &config, &source).await
    });

    match result {
        Ok(report) => {
            write_step_outputs(args.github_output.as_deref(), &report);
            0
        }
        Err(e) => {
            tracing::error!("{}", e.message());
            commands::fail(&e);
            1
        }
    }
}

/// Expose the deployment URL (and the aliased domain) to later steps
fn write_step_outputs(output_file: Option<&std::path::Path>, report: &RunReport) {
    let Some(path) = output_file else {
        tracing::warn!("GITHUB_OUTPUT not set, skipping step outputs");
        return;
    };
    let writer = OutputWriter::new(path);

    let mut outputs = vec![("preview-url", report.deployment.url())];
    if let AliasStatus::Assigned(domain) = &report.alias {
        outputs.push(("preview-domain", domain.as_str()));
    }

    for (name, value) in outputs {
        if let Err(e) = writer.set_output(name, value) {
            let warning = format!("Cannot write step output {name}: {e}");
            tracing::warn!("{warning}");
            commands::warning(&warning);
        }
    }
}
