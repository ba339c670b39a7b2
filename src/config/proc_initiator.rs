use std::path::Path;

use crate::config::audit::ServiceConfig;
use crate::config::settings::{LogFormat, LoggingConfig, RetryConfig};

pub fn initiate_default_values(mut config: ServiceConfig, config_dir: &Path) -> ServiceConfig {
    // resource urls are built by plain concatenation
    let base_url = config.settings.base_url.trim().to_owned();
    config.settings.base_url = if base_url.is_empty() || base_url.ends_with('/') {
        base_url
    } else {
        format!("{}/", base_url)
    };

    if config.settings.logging.is_none() {
        config.settings.logging = Some(LoggingConfig::new("info".to_owned(), LogFormat::Compact));
    }
    if config.settings.retry.is_none() {
        config.settings.retry = Some(RetryConfig::default());
    }

    config.paths = config.paths.relative_to(config_dir);
    config.settings.metrics.textfile = config
        .settings
        .metrics
        .textfile
        .take()
        .map(|p| if p.is_relative() { config_dir.join(p) } else { p });
    config
}
