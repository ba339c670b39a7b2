use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::config::settings::SettingsConfig;
use crate::utils::constants::{
    DEFAULT_ENDPOINTS_FILE, DEFAULT_EXPORTS_DIR, DEFAULT_EXTENSION_MARKER,
    DEFAULT_EXTENSION_SEGMENT, DEFAULT_LAST_RUN_FILE, DEFAULT_PRIMARY_SEGMENT,
    DEFAULT_TOKEN_LIFETIME_SECONDS, DEFAULT_VISUALIZATION_DIR,
};

/// ================================
/// Full service configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub settings: SettingsConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub segments: SegmentsConfig,
}

/// ================================
/// Client-credentials grant
/// ================================
#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    pub token_url: String,
    pub api_key: String,
    pub api_secret: String,
    /// local approximation of the server token TTL, the response is not consulted
    #[serde(default = "default_token_lifetime_seconds")]
    pub token_lifetime_seconds: u64,
}

// keep the secret out of logs
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_url", &self.token_url)
            .field("api_key", &self.api_key)
            .field("api_secret", &"***")
            .field("token_lifetime_seconds", &self.token_lifetime_seconds)
            .finish()
    }
}

/// ================================
/// Input list and report locations
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct PathsConfig {
    #[serde(default = "default_endpoints")]
    pub endpoints: PathBuf,
    #[serde(default = "default_exports_dir")]
    pub exports_dir: PathBuf,
    #[serde(default = "default_visualization_dir")]
    pub visualization_dir: PathBuf,
    #[serde(default = "default_last_run_file")]
    pub last_run_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            exports_dir: default_exports_dir(),
            visualization_dir: default_visualization_dir(),
            last_run_file: default_last_run_file(),
        }
    }
}

impl PathsConfig {
    /// Resolve every relative path against `root`
    pub fn relative_to(self, root: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { root.join(p) } else { p };
        Self {
            endpoints: resolve(self.endpoints),
            exports_dir: resolve(self.exports_dir),
            visualization_dir: resolve(self.visualization_dir),
            last_run_file: resolve(self.last_run_file),
        }
    }
}

/// Base path segments an endpoint can live under
#[derive(Debug, Deserialize, Clone)]
pub struct SegmentsConfig {
    #[serde(default = "default_primary")]
    pub primary: String,
    #[serde(default = "default_extension")]
    pub extension: String,
    /// a list line containing this marker is routed to `extension`
    #[serde(default = "default_extension_marker")]
    pub extension_marker: String,
}

impl Default for SegmentsConfig {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            extension: default_extension(),
            extension_marker: default_extension_marker(),
        }
    }
}

fn default_token_lifetime_seconds() -> u64 {
    DEFAULT_TOKEN_LIFETIME_SECONDS
}
fn default_endpoints() -> PathBuf {
    PathBuf::from(DEFAULT_ENDPOINTS_FILE)
}
fn default_exports_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORTS_DIR)
}
fn default_visualization_dir() -> PathBuf {
    PathBuf::from(DEFAULT_VISUALIZATION_DIR)
}
fn default_last_run_file() -> PathBuf {
    PathBuf::from(DEFAULT_LAST_RUN_FILE)
}
fn default_primary() -> String {
    DEFAULT_PRIMARY_SEGMENT.to_owned()
}
fn default_extension() -> String {
    DEFAULT_EXTENSION_SEGMENT.to_owned()
}
fn default_extension_marker() -> String {
    DEFAULT_EXTENSION_MARKER.to_owned()
}
