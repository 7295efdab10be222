//! GitHub Actions workflow commands and step outputs

pub mod commands;
pub mod writer;

pub use writer::OutputWriter;
