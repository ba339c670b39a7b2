use chrono::{Local, Utc};

use crate::utils::constants::RUN_TIMESTAMP_FORMAT;

pub fn now_i64() -> i64 {
    Utc::now().timestamp()
}

/// Local wall-clock stamp used in report names and the run marker
pub fn run_timestamp() -> String {
    Local::now().format(RUN_TIMESTAMP_FORMAT).to_string()
}
