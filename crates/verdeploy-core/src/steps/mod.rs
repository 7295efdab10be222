//! The individual stages of a deployment run

pub mod alias;
pub mod build;
pub mod deploy;
pub mod env;
pub mod notify;

use std::path::{Path, PathBuf};

/// Launcher used for both the package manager and the Vercel CLI
pub const PACKAGE_RUNNER: &str = "npx";

/// Resolve a configured source directory relative to the workspace root
pub fn source_dir(path: &str) -> PathBuf {
    Path::new(".").join(path)
}
