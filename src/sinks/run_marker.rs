use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::helpers::fs::write_atomic;
use crate::utils::constants::NEVER_RUN;

/// Timestamp of the last completed run, persisted as a single value
#[derive(Debug, Clone)]
pub struct RunMarker {
    pub path: PathBuf,
}

impl RunMarker {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Previous run timestamp, "Never" when nothing was recorded yet
    pub async fn read(&self) -> Result<String> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) if !content.trim().is_empty() => Ok(content.trim().to_owned()),
            Ok(_) => Ok(NEVER_RUN.to_owned()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No previous run marker found at '{}'", self.path.display());
                Ok(NEVER_RUN.to_owned())
            }
            Err(e) => Err(e)
                .with_context(|| format!("cannot read run marker '{}'", self.path.display())),
        }
    }

    pub async fn replace(&self, run_timestamp: &str) -> Result<()> {
        write_atomic(&self.path, run_timestamp.as_bytes()).await
    }
}
