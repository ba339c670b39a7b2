//! Fatal error types for an audit run.
//!
//! Per-endpoint failures are not errors: they are reported as
//! [`FetchOutcome`](crate::sources::fetch::FetchOutcome) values and end up as `Failed` rows.
//! Everything here aborts the run.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    /// Token endpoint answered with anything but 200
    #[error("Failed to retrieve access token: {status}, {body}")]
    Authentication { status: u16, body: String },

    /// Token endpoint answered 200 but the body has no usable `access_token`
    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(#[from] serde_json::Error),

    /// Token endpoint could not be reached at all
    #[error("Token request failed: {0}")]
    TokenTransport(#[from] reqwest::Error),

    /// Missing or invalid configuration, detected before any network activity
    #[error("config is not valid: {0}")]
    Configuration(String),
}
