use std::path::Path;

use crate::config::audit::ServiceConfig;
use crate::config::proc_initiator::initiate_default_values;
use crate::config::proc_validator;
use crate::error::AuditError;
use crate::observability::metrics::get_metrics;
use anyhow::{Context, Result};
use regex::Regex;
use tracing::{debug, error};

/// Load and validate config from YAML file
pub async fn file_to_config(path: &Path) -> Result<ServiceConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("cannot read config file '{}'", path.display()))?;

    let expanded = expand_env_vars(&content);
    let config_dir = path.parent().unwrap_or_else(|| Path::new(""));
    parse_config(expanded, config_dir).await
}

/// Parse YAML content, apply defaults and validate.
/// Relative paths inside the config resolve against `config_dir`.
pub async fn parse_config(content: String, config_dir: &Path) -> Result<ServiceConfig> {
    let metrics = get_metrics().await;
    let service_config: ServiceConfig = serde_yaml::from_str(&content)
        .inspect_err(|e| {
            error!("parse config error: {}", e);
            metrics.config_validation_errors.inc();
        })
        .map_err(|e| AuditError::Configuration(e.to_string()))?;

    let service_config = initiate_default_values(service_config, config_dir);
    debug!("validation config ...");
    proc_validator::validate_service_config(&service_config)
        .await
        .map_err(|errors| {
            AuditError::Configuration(format!(
                "total errors: {}, {}",
                errors.len(),
                errors.join("; ")
            ))
        })?;

    Ok(service_config)
}

/// Replace `${VAR}` and `${VAR:default}` with environment values
pub fn expand_env_vars(input: &str) -> String {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]*))?\}").expect("static regex");
    re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}
