use serde::Deserialize;
use std::path::PathBuf;

use crate::utils::constants::{
    DEFAULT_ATTEMPTS, DEFAULT_BACKOFF_FACTOR, DEFAULT_BACKOFF_UNIT_MS, DEFAULT_ENDPOINT_DELAY_MS,
    DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_MAX_BACKOFF_MS,
};

/// ================================
/// Global service-wide settings
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct SettingsConfig {
    /// API root, resource urls are built as `{base_url}{segment}/{name}`
    pub base_url: String,
    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,
    /// self-imposed pause between two endpoints
    #[serde(default = "default_endpoint_delay_ms")]
    pub endpoint_delay_ms: u64,
    pub retry: Option<RetryConfig>,
    #[serde(default)]
    pub metrics: MetricsConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RetryConfig {
    /// total attempts, the first request included
    pub attempts: Option<u32>,
    /// delay before retry `n` is `backoff_unit_ms * backoff_factor^n`
    /// invariant: > 1.0 so delays strictly grow
    pub backoff_factor: Option<f64>,
    pub backoff_unit_ms: Option<u64>,
    /// upper bound for a single backoff delay
    pub max_backoff_ms: Option<u64>,
}

impl RetryConfig {
    pub fn attempts(&self) -> u32 {
        self.attempts.unwrap_or(DEFAULT_ATTEMPTS)
    }

    pub fn backoff_factor(&self) -> f64 {
        self.backoff_factor.unwrap_or(DEFAULT_BACKOFF_FACTOR)
    }

    pub fn backoff_unit_ms(&self) -> u64 {
        self.backoff_unit_ms.unwrap_or(DEFAULT_BACKOFF_UNIT_MS)
    }

    pub fn max_backoff_ms(&self) -> u64 {
        self.max_backoff_ms.unwrap_or(DEFAULT_MAX_BACKOFF_MS)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MetricsConfig {
    /// prometheus textfile written at the end of every run
    pub textfile: Option<PathBuf>,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}

fn default_http_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}

fn default_endpoint_delay_ms() -> u64 {
    DEFAULT_ENDPOINT_DELAY_MS
}
