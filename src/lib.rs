//! # API Auditor Library
//!
//! Polls a list of REST endpoints behind an OAuth2 client-credentials token,
//! counts what each one returns and writes an archive report, a latest
//! snapshot and a run marker.
//!
//! Modules:
//! - `config` — service configuration, defaults and validation
//! - `cache` — access token and its lifecycle
//! - `sources` — token acquisition and resilient resource fetching
//! - `report` — run driver and report rows
//! - `sinks` — CSV reports and the run marker

pub mod cache;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod helpers;
pub mod observability;
pub mod report;
pub mod resilience;
pub mod sinks;
pub mod sources;
pub mod utils;
#[cfg(test)]
mod tests;

pub use crate::config::audit::ServiceConfig;
pub use crate::error::AuditError;
