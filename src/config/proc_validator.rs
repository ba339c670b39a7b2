//! Configuration validation with aggregated errors.
//! - Aggregates all issues into Vec<String>
//! - Validates:
//!   * base url and token url shape
//!   * credentials presence
//!   * retry invariants (attempts, growing backoff)
//!   * token lifetime, segments, logging level

use tracing::{error, info};

use crate::config::audit::{AuthConfig, SegmentsConfig, ServiceConfig};
use crate::config::settings::{RetryConfig, SettingsConfig};
use crate::observability::metrics::get_metrics;

/// Public entrypoint: returns Ok(()) or Err(Vec<String>) containing all issues.
pub async fn validate_service_config(cfg: &ServiceConfig) -> Result<(), Vec<String>> {
    let mut errors: Vec<String> = Vec::new();

    validate_settings(&cfg.settings, &mut errors);
    validate_auth(&cfg.auth, &mut errors);
    validate_segments(&cfg.segments, &mut errors);

    if errors.is_empty() {
        info!("config valid");
        Ok(())
    } else {
        error!("configuration validation errors ({}):", errors.len());
        for e in &errors {
            error!(" - {}", e);
        }
        get_metrics().await.config_validation_errors.inc();
        Err(errors)
    }
}

/// SETTINGS VALIDATION
fn validate_settings(settings: &SettingsConfig, errors: &mut Vec<String>) {
    validate_http_url("settings.base_url", &settings.base_url, errors);

    if settings.http_timeout_ms == 0 {
        errors.push("settings.http_timeout_ms must be > 0".to_string());
    }

    if let Some(retry) = &settings.retry {
        validate_retry("settings.retry", retry, errors);
    }

    // logging level
    if let Some(logging) = &settings.logging {
        let valid = ["trace", "debug", "info", "warn", "error"];
        if !valid.contains(&logging.level.to_lowercase().as_str()) {
            errors.push(format!(
                "settings.logging.level '{}' invalid; allowed: {:?}",
                logging.level, valid
            ));
        }
    }

    if let Some(path) = &settings.metrics.textfile {
        if path.as_os_str().is_empty() {
            errors.push("settings.metrics.textfile cannot be empty when present".to_string());
        }
    }
}

fn validate_retry(path: &str, retry: &RetryConfig, errors: &mut Vec<String>) {
    if retry.attempts() == 0 {
        errors.push(format!("{}.attempts must be > 0", path));
    }
    let factor = retry.backoff_factor();
    if !factor.is_finite() || factor <= 1.0 {
        errors.push(format!(
            "{}.backoff_factor ({}) must be > 1.0 so that delays grow between attempts",
            path, factor
        ));
    }
    if retry.max_backoff_ms() < retry.backoff_unit_ms() {
        errors.push(format!(
            "{}.max_backoff_ms ({}) must be >= backoff_unit_ms ({})",
            path,
            retry.max_backoff_ms(),
            retry.backoff_unit_ms()
        ));
    }
}

/// AUTH VALIDATION
fn validate_auth(auth: &AuthConfig, errors: &mut Vec<String>) {
    validate_http_url("auth.token_url", &auth.token_url, errors);

    if auth.api_key.trim().is_empty() {
        errors.push("auth.api_key cannot be empty".to_string());
    }
    if auth.api_secret.trim().is_empty() {
        errors.push("auth.api_secret cannot be empty".to_string());
    }
    if auth.token_lifetime_seconds == 0 {
        errors.push("auth.token_lifetime_seconds must be > 0".to_string());
    }
}

fn validate_segments(segments: &SegmentsConfig, errors: &mut Vec<String>) {
    for (name, value) in [
        ("segments.primary", &segments.primary),
        ("segments.extension", &segments.extension),
        ("segments.extension_marker", &segments.extension_marker),
    ] {
        if value.trim().is_empty() {
            errors.push(format!("{} cannot be empty", name));
        }
    }
    if segments.primary.contains('/') || segments.extension.contains('/') {
        errors.push("segments must be single path segments without '/'".to_string());
    }
}

fn validate_http_url(path: &str, url: &str, errors: &mut Vec<String>) {
    let url = url.trim();
    if url.is_empty() {
        errors.push(format!("{} cannot be empty", path));
    } else if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!(
            "{} '{}' must start with 'http://' or 'https://'",
            path, url
        ));
    }
}
