use anyhow::Result;

use crate::report::row::ReportRow;
use crate::sinks::TabularSink;

pub const COLUMN_HEADERS: [&str; 4] = ["Endpoint", "Status", "Record Count", "Message"];

/// Archive + latest-snapshot pair, every report row goes to both
pub struct SinkManager {
    archive: Box<dyn TabularSink>,
    latest: Box<dyn TabularSink>,
}

impl SinkManager {
    pub fn new(archive: Box<dyn TabularSink>, latest: Box<dyn TabularSink>) -> Self {
        Self { archive, latest }
    }

    /// Run metadata on the archive, column headers on both
    pub fn write_headers(&mut self, current_run: &str, last_run: &str) -> Result<()> {
        self.archive.write_row(&[
            "Current Run Date".to_owned(),
            current_run.to_owned(),
            "Last Run Date".to_owned(),
            last_run.to_owned(),
        ])?;
        let headers: Vec<String> = COLUMN_HEADERS.iter().map(|h| h.to_string()).collect();
        self.archive.write_row(&headers)?;
        self.latest.write_row(&headers)
    }

    pub fn write_report_row(&mut self, row: &ReportRow) -> Result<()> {
        let record = row.to_record();
        self.archive.write_row(&record)?;
        self.latest.write_row(&record)
    }
}
