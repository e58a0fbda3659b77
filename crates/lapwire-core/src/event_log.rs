use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, Result};

/// Append-only log of successfully decoded frames, one line each.
///
/// The file is opened, appended, flushed, and closed per line, so no handle
/// outlives a pipeline invocation and external log rotation stays safe.
#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line, creating the file on first use.
    pub fn append(&self, line: &str) -> Result<()> {
        let write = |path: &Path| -> std::io::Result<()> {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            writeln!(file, "{line}")?;
            file.flush()
        };

        write(&self.path).map_err(|source| CoreError::EventLog {
            path: self.path.clone(),
            source,
        })
    }
}
