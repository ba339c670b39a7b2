//! Shared constants and invariants

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_ENDPOINT_DELAY_MS: u64 = 3_000;

// Retry
pub const DEFAULT_ATTEMPTS: u32 = 5;
pub const DEFAULT_BACKOFF_FACTOR: f64 = 2.0;
pub const DEFAULT_BACKOFF_UNIT_MS: u64 = 1_000;
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 120_000;

// Token
pub const DEFAULT_TOKEN_LIFETIME_SECONDS: u64 = 3_600;
pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

// Files
pub const DEFAULT_ENDPOINTS_FILE: &str = "Endpoints.txt";
pub const DEFAULT_EXPORTS_DIR: &str = "exports";
pub const DEFAULT_VISUALIZATION_DIR: &str = "visualization";
pub const DEFAULT_LAST_RUN_FILE: &str = "last_run.txt";
pub const ARCHIVE_FILE_PREFIX: &str = "ARCExport_";
pub const LATEST_SNAPSHOT_FILE: &str = "VisualizationData.csv";

// Base path segments
pub const DEFAULT_PRIMARY_SEGMENT: &str = "ed-fi";
pub const DEFAULT_EXTENSION_SEGMENT: &str = "tpdm";
pub const DEFAULT_EXTENSION_MARKER: &str = ":tpdm";

// Run marker
pub const NEVER_RUN: &str = "Never";
pub const RUN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
