use std::fmt;

use crate::sources::fetch::FetchOutcome;

pub const SUCCESS_MESSAGE: &str = "Data fetched successfully";
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to fetch data or all retries failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Success,
    Failed,
}

impl fmt::Display for RowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowStatus::Success => f.write_str("Success"),
            RowStatus::Failed => f.write_str("Failed"),
        }
    }
}

/// One line of the report, one per endpoint per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub endpoint_url: String,
    pub status: RowStatus,
    pub record_count: usize,
    pub message: String,
}

impl ReportRow {
    pub fn from_outcome(endpoint_url: String, outcome: &FetchOutcome) -> Self {
        let (status, record_count, message) = match outcome {
            FetchOutcome::Success { item_count } => {
                (RowStatus::Success, *item_count, SUCCESS_MESSAGE.to_owned())
            }
            FetchOutcome::HttpError { status, body } => {
                (RowStatus::Failed, 0, format!("Error {}: {}", status, body))
            }
            FetchOutcome::TransportError { .. } => {
                (RowStatus::Failed, 0, TRANSPORT_FAILURE_MESSAGE.to_owned())
            }
        };
        Self {
            endpoint_url,
            status,
            record_count,
            message,
        }
    }

    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.endpoint_url.clone(),
            self.status.to_string(),
            self.record_count.to_string(),
            self.message.clone(),
        ]
    }
}
