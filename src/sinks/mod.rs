use anyhow::Result;

pub mod csv_sink;
pub mod manager;
pub mod memory_sink;
pub mod run_marker;

/// Row-oriented output, one call per row, rows are durable once written
pub trait TabularSink: Send {
    fn write_row(&mut self, row: &[String]) -> Result<()>;
}
