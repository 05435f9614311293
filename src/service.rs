//! Request-scoped pipeline: one upstream fetch, one normalization.

use crate::monitor::{find_detail, summarize_all, MonitorReport, MonitorSummary};
use crate::upstream::{MonitorQuery, UpstreamClient, UpstreamError};

use chrono::Utc;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced to request handlers.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("upstream timed out after {0:?}")]
    UpstreamTimeout(Duration),
    #[error("monitor {0} not found")]
    NotFound(String),
}

impl From<UpstreamError> for DashboardError {
    fn from(e: UpstreamError) -> Self {
        match e {
            UpstreamError::MissingApiKey => DashboardError::Configuration(e.to_string()),
            UpstreamError::Timeout(d) => DashboardError::UpstreamTimeout(d),
            UpstreamError::Unavailable(msg) => DashboardError::UpstreamUnavailable(msg),
        }
    }
}

/// Fetches and normalizes monitor data. Holds no mutable state.
#[derive(Debug, Clone)]
pub struct Dashboard {
    client: UpstreamClient,
}

impl Dashboard {
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    /// All monitors on the account. Zero monitors is an empty list.
    pub async fn list_monitors(&self) -> Result<Vec<MonitorSummary>, DashboardError> {
        let payload = self.client.fetch_monitors(&MonitorQuery::List).await?;
        let summaries = summarize_all(&payload);

        if summaries.len() < payload.monitors.len() {
            tracing::warn!(
                "Skipped {} of {} monitors with malformed fields",
                payload.monitors.len() - summaries.len(),
                payload.monitors.len()
            );
        }

        Ok(summaries)
    }

    /// One monitor with its events, or `NotFound`.
    pub async fn monitor_detail(&self, id: &str) -> Result<MonitorReport, DashboardError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(DashboardError::NotFound(id.to_string()));
        }

        let query = MonitorQuery::Detail { id: id.to_string() };
        let payload = self.client.fetch_monitors(&query).await?;

        find_detail(&payload, id, Utc::now())
            .ok_or_else(|| DashboardError::NotFound(id.to_string()))
    }
}
