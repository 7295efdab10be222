//! Optional static site build

use std::path::Path;

use crate::error::Result;
use crate::output::commands::GroupGuard;
use crate::process::CommandSpec;
use crate::steps::{source_dir, PACKAGE_RUNNER};
use crate::traits::CommandRunner;
use crate::types::InputConfig;

/// Dependency install command
pub fn install_command(dir: &Path) -> CommandSpec {
    CommandSpec::new(PACKAGE_RUNNER).arg("yarn").current_dir(dir)
}

/// Site build command
pub fn build_command(dir: &Path) -> CommandSpec {
    CommandSpec::new(PACKAGE_RUNNER)
        .args(["yarn", "build"])
        .current_dir(dir)
}

/// Install dependencies then build, inside the build source directory.
///
/// The build command is only launched once the install succeeded; either
/// failure aborts the run.
pub async fn build_static<R>(runner: &R, config: &InputConfig<'_>) -> Result<()>
where
    R: CommandRunner,
{
    tracing::info!("[Build starts]");
    let dir = source_dir(&config.build_source);
    tracing::info!("Build source is at : {}", dir.display());

    let _group = GroupGuard::open("Build");
    runner.run(&install_command(&dir)).await?;
    runner.run(&build_command(&dir)).await?;

    tracing::info!("[Build ends]");
    Ok(())
}
