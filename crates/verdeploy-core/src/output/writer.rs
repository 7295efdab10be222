//! Step output writer for `$GITHUB_OUTPUT`

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const DELIMITER: &str = "VERDEPLOY_EOF";

/// Appends `name<<DELIM` / value / `DELIM` blocks to the runner's output file
#[derive(Debug, Clone)]
pub struct OutputWriter {
    path: PathBuf,
}

impl OutputWriter {
    /// Writer for an explicit output file
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Output file in use
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one output value
    pub fn set_output(&self, name: &str, value: &str) -> Result<()> {
        if value.lines().any(|line| line == DELIMITER) {
            return Err(Error::Other(format!(
                "output '{}' contains the reserved delimiter",
                name
            )));
        }

        let mut f = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;

        writeln!(f, "{name}<<{DELIMITER}")?;
        writeln!(f, "{value}")?;
        writeln!(f, "{DELIMITER}")?;
        Ok(())
    }
}
