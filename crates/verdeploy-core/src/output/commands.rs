//! Workflow commands (`::name::message`) understood by the Actions runner

use std::io::Write;

use crate::error::Error;

/// Escape workflow command data so `%`, `\r` and `\n` survive the runner's
/// line-based parser
pub fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Render a workflow command line (without trailing newline)
pub fn format_command(name: &str, message: &str) -> String {
    format!("::{}::{}", name, escape_data(message))
}

/// `::error::` line for a fatal error, carrying its message without the
/// category prefix
pub fn failure_command(err: &Error) -> String {
    format_command("error", &err.message())
}

fn emit(line: &str) {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    let _ = writeln!(lock, "{}", line);
}

fn issue(name: &str, message: &str) {
    emit(&format_command(name, message));
}

/// Register a secret with the runner so it is masked in all later log output
pub fn add_mask(secret: &str) {
    if !secret.is_empty() {
        issue("add-mask", secret);
    }
}

/// Emit a warning annotation
pub fn warning(message: &str) {
    issue("warning", message);
}

/// Report the error that failed the run
pub fn fail(err: &Error) {
    emit(&failure_command(err));
}

/// Start a collapsible log group
pub fn start_group(title: &str) {
    issue("group", title);
}

/// Close the current log group
pub fn end_group() {
    issue("endgroup", "");
}

/// Closes a log group when dropped, so early returns through `?` still end
/// the group.
#[must_use = "the group closes as soon as the guard is dropped"]
pub struct GroupGuard(());

impl GroupGuard {
    /// Open a group titled `title`
    pub fn open(title: &str) -> Self {
        start_group(title);
        GroupGuard(())
    }
}

impl Drop for GroupGuard {
    fn drop(&mut self) {
        end_group();
    }
}
