//! Subprocess execution with live output logging

pub mod command;
pub mod runner;

pub use command::{CommandSpec, ProcessOutput};
pub use runner::TokioCommandRunner;
