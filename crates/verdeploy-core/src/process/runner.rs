//! Tokio-backed subprocess runner

use std::future::Future;
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::error::{Error, Result};
use crate::process::{CommandSpec, ProcessOutput};
use crate::traits::CommandRunner;

/// Runs commands with `tokio::process`, logging every output line as it
/// arrives and capturing both streams.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioCommandRunner;

impl TokioCommandRunner {
    /// Create a runner
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for TokioCommandRunner {
    fn run<'a>(
        &'a self,
        command: &'a CommandSpec,
    ) -> impl Future<Output = Result<ProcessOutput>> + Send + 'a {
        async move {
            tracing::info!("[command]{}", command.display());

            let mut cmd = tokio::process::Command::new(&command.program);
            cmd.args(&command.args)
                .envs(&command.env)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true);
            if let Some(dir) = &command.working_dir {
                cmd.current_dir(dir);
            }

            let mut child = cmd.spawn().map_err(|e| {
                Error::Spawn(format!("Unable to launch '{}': {}", command.program, e))
            })?;

            let stdout = child
                .stdout
                .take()
                .ok_or_else(|| Error::Runtime("child stdout was not captured".to_string()))?;
            let stderr = child
                .stderr
                .take()
                .ok_or_else(|| Error::Runtime("child stderr was not captured".to_string()))?;

            // Both pipes are drained together; a child blocked on a full stderr
            // pipe would otherwise never close stdout.
            let (stdout, stderr) = tokio::try_join!(drain(stdout), drain(stderr))?;

            let status = child.wait().await?;
            let code = status.code().unwrap_or(-1);
            if !status.success() {
                return Err(Error::process_failed(&command.program, code));
            }

            Ok(ProcessOutput {
                stdout,
                stderr,
                status: code,
            })
        }
    }
}

/// Read a stream to EOF, logging each line and keeping the raw bytes.
async fn drain<R>(reader: R) -> Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut captured = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        captured.extend_from_slice(&line);
        tracing::info!(
            "{}",
            String::from_utf8_lossy(&line).trim_end_matches(['\r', '\n'])
        );
    }

    Ok(String::from_utf8_lossy(&captured).into_owned())
}
