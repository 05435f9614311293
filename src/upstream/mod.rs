//! Upstream module for the uptime-monitoring API.
//!
//! Issues the `getMonitors` call and hands back raw, loosely-typed payloads.

mod client;
mod raw;

pub use client::*;
pub use raw::*;

use std::time::Duration;
use thiserror::Error;

/// Upstream error types.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("API key not configured")]
    MissingApiKey,
    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),
    #[error("upstream unavailable: {0}")]
    Unavailable(String),
}
