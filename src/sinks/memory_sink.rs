use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use crate::sinks::TabularSink;

/// In-memory sink, clones share the same rows
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    rows: Arc<Mutex<Vec<Vec<String>>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<Vec<String>> {
        self.rows.lock().map(|rows| rows.clone()).unwrap_or_default()
    }
}

impl TabularSink for MemorySink {
    fn write_row(&mut self, row: &[String]) -> Result<()> {
        self.rows
            .lock()
            .map_err(|_| anyhow!("memory sink poisoned"))?
            .push(row.to_vec());
        Ok(())
    }
}
