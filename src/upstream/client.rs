//! HTTP client for the `getMonitors` endpoint.

use super::{RawPayload, UpstreamError};
use crate::config::UpstreamConfig;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use std::time::Duration;

/// Number of daily ranges requested for the history bar.
pub const HISTORY_DAYS: usize = 90;

/// Samples requested for the detail chart.
const DETAIL_SAMPLE_LIMIT: u32 = 100;

/// Which monitors to ask for and how much data to pull per monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorQuery {
    /// Every monitor on the account, with the latest response time only.
    List,
    /// One monitor with windows, history, response times and logs.
    Detail { id: String },
}

impl MonitorQuery {
    /// Form fields for this query, excluding the API key.
    pub fn form_fields(&self, now: DateTime<Utc>) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("format", "json".to_string()),
            ("all_time_uptime_ratio", "1".to_string()),
            ("response_times", "1".to_string()),
        ];

        match self {
            MonitorQuery::List => {
                fields.push(("response_times_limit", "1".to_string()));
            }
            MonitorQuery::Detail { id } => {
                fields.push(("monitors", id.clone()));
                fields.push(("custom_uptime_ratios", "1-7-30-90".to_string()));
                fields.push(("custom_uptime_ranges", daily_ranges(now, HISTORY_DAYS)));
                fields.push(("response_times_limit", DETAIL_SAMPLE_LIMIT.to_string()));
                fields.push(("logs", "1".to_string()));
                fields.push(("logs_limit", DETAIL_SAMPLE_LIMIT.to_string()));
            }
        }

        fields
    }
}

/// Build `start_end` pairs for the last `days` whole days, oldest first.
fn daily_ranges(now: DateTime<Utc>, days: usize) -> String {
    let today = now.timestamp() - now.timestamp().rem_euclid(86_400);
    (0..days)
        .rev()
        .map(|back| {
            let start = today - ChronoDuration::days(back as i64 + 1).num_seconds();
            let end = start + 86_399;
            format!("{}_{}", start, end)
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Client for the uptime-monitoring API.
///
/// Holds no state beyond its configuration; every call is one POST.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    /// Create a client bound by the configured timeout.
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| UpstreamError::Unavailable(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Fetch monitors matching `query`.
    ///
    /// A missing API key fails before any network I/O.
    pub async fn fetch_monitors(&self, query: &MonitorQuery) -> Result<RawPayload, UpstreamError> {
        let api_key = self.config.api_key.as_deref().ok_or(UpstreamError::MissingApiKey)?;

        let mut form = query.form_fields(Utc::now());
        form.push(("api_key", api_key.to_string()));

        let timeout = self.config.timeout;
        let response = self
            .http
            .post(&self.config.api_url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(CACHE_CONTROL, "no-cache")
            .form(&form)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Upstream returned HTTP {}", status);
            return Err(UpstreamError::Unavailable(format!("upstream returned HTTP {}", status)));
        }

        let payload: RawPayload = response.json().await.map_err(|e| classify(e, timeout))?;

        tracing::debug!(
            "Upstream response: stat={:?}, {} monitors",
            payload.stat,
            payload.monitors.len()
        );

        if !payload.is_ok() {
            let message = payload.failure_message();
            tracing::error!("Upstream reported failure: {}", message);
            return Err(UpstreamError::Unavailable(message));
        }

        Ok(payload)
    }
}

fn classify(e: reqwest::Error, timeout: Duration) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout(timeout)
    } else {
        UpstreamError::Unavailable(e.to_string())
    }
}
