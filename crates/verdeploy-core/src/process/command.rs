//! Command description and captured output

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Placeholder printed instead of secret argument values
const REDACTED: &str = "***";

/// A subprocess invocation: program, arguments, working directory and the
/// environment overrides merged on top of the inherited environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program to launch, resolved through `PATH`
    pub program: String,
    /// Arguments, passed verbatim (no shell involved)
    pub args: Vec<String>,
    /// Working directory, inherited when `None`
    pub working_dir: Option<PathBuf>,
    /// Variables added to the child's environment
    pub env: BTreeMap<String, String>,
    secrets: Vec<String>,
}

impl CommandSpec {
    /// Start describing an invocation of `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append an argument whose value must never be logged
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        let arg = arg.into();
        if !arg.is_empty() {
            self.secrets.push(arg.clone());
        }
        self.args.push(arg);
        self
    }

    /// Set the working directory
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.working_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Merge environment overrides
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Command line for logs, with secret arguments replaced by `***`
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            if self.secrets.iter().any(|s| s == arg) {
                line.push_str(REDACTED);
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Captured output of a finished subprocess
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Everything written to stdout, byte-for-byte (lossy UTF-8)
    pub stdout: String,
    /// Everything written to stderr
    pub stderr: String,
    /// Exit code
    pub status: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_args_and_env() {
        let cmd = CommandSpec::new("npx")
            .arg("vercel")
            .args(["-m", "githubDeployment=1"])
            .current_dir("./site")
            .envs([("VERCEL_ORG_ID", "org")]);

        assert_eq!(cmd.program, "npx");
        assert_eq!(cmd.args, vec!["vercel", "-m", "githubDeployment=1"]);
        assert_eq!(cmd.working_dir.as_deref(), Some(Path::new("./site")));
        assert_eq!(cmd.env.get("VERCEL_ORG_ID").map(String::as_str), Some("org"));
    }

    #[test]
    fn test_display_redacts_secrets() {
        let cmd = CommandSpec::new("npx")
            .args(["vercel", "--token"])
            .secret_arg("s3cr3t")
            .args(["-m", "githubCommitRef=main"]);

        let shown = cmd.display();
        assert_eq!(shown, "npx vercel --token *** -m githubCommitRef=main");
        assert!(!shown.contains("s3cr3t"));
        // The real argument is still passed through
        assert!(cmd.args.iter().any(|a| a == "s3cr3t"));
    }

    #[test]
    fn test_empty_secret_is_not_tracked() {
        let cmd = CommandSpec::new("npx").args(["--token"]).secret_arg("");
        assert_eq!(cmd.display(), "npx --token ");
    }
}
