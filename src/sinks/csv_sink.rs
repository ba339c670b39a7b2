use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::{Writer, WriterBuilder};
use tracing::debug;

use crate::sinks::TabularSink;

/// CSV file sink, truncates on open and flushes after every row
pub struct CsvSink {
    pub path: PathBuf,
    writer: Writer<File>,
}

impl CsvSink {
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create directory '{}'", parent.display()))?;
        }
        let writer = WriterBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("cannot open report '{}'", path.display()))?;
        debug!("report '{}' opened", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }
}

impl TabularSink for CsvSink {
    fn write_row(&mut self, row: &[String]) -> Result<()> {
        self.writer
            .write_record(row)
            .with_context(|| format!("cannot write to '{}'", self.path.display()))?;
        self.writer.flush()?;
        Ok(())
    }
}
