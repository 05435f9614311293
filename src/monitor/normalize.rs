//! Summary and detail assembly.

use super::{
    aggregate_response_times, format_timestamp, parse_daily_history, parse_uptime_windows,
    reconstruct_events, timestamp_from_epoch, MonitorDetail, MonitorReport, MonitorStatus,
    MonitorSummary, NormalizeError, UNNAMED_MONITOR,
};
use crate::upstream::{RawMonitor, RawPayload};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Decode one untyped monitor object.
pub fn decode_monitor(value: &Value) -> Result<RawMonitor, NormalizeError> {
    RawMonitor::deserialize(value).map_err(|e| NormalizeError::malformed("monitor", e.to_string()))
}

/// Build the dashboard row for a monitor.
pub fn summarize(raw: &RawMonitor) -> Result<MonitorSummary, NormalizeError> {
    let id = monitor_id(&raw.id)?;
    let uptime_ratio = match raw.all_time_uptime_ratio.as_ref() {
        Some(value) => parse_ratio(value)?,
        None => 0.0,
    };

    // Zero means the monitor has never been checked.
    let last_checked_at = raw
        .last_check
        .filter(|&secs| secs > 0)
        .and_then(timestamp_from_epoch);

    let status = raw
        .status
        .map(MonitorStatus::from_code)
        .unwrap_or(MonitorStatus::Unknown);

    let name = raw
        .friendly_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNNAMED_MONITOR)
        .to_string();

    Ok(MonitorSummary {
        id,
        name,
        url: raw.url.clone().unwrap_or_default(),
        status,
        status_text: status.text(),
        status_class: status.class(),
        uptime_ratio,
        last_checked_at,
        last_check: format_timestamp(last_checked_at),
    })
}

/// Build the detail view and event log for a monitor.
pub fn detail(raw: &RawMonitor, now: DateTime<Utc>) -> Result<MonitorReport, NormalizeError> {
    let summary = summarize(raw)?;

    let monitor = MonitorDetail {
        summary,
        uptime_by_window: parse_uptime_windows(
            raw.custom_uptime_ratio.as_deref().unwrap_or_default(),
        ),
        daily_history: parse_daily_history(raw.custom_uptime_ranges.as_deref()),
        response_time_stats: aggregate_response_times(&raw.response_times),
    };

    Ok(MonitorReport {
        monitor,
        events: reconstruct_events(&raw.logs, now),
    })
}

/// Summaries for every well-formed monitor in the payload.
///
/// Malformed monitors are logged and skipped.
pub fn summarize_all(payload: &RawPayload) -> Vec<MonitorSummary> {
    payload
        .monitors
        .iter()
        .enumerate()
        .filter_map(|(index, value)| {
            match decode_monitor(value).and_then(|raw| summarize(&raw)) {
                Ok(summary) => Some(summary),
                Err(e) => {
                    tracing::warn!("Skipping monitor #{} ({}): {}", index, describe_id(value), e);
                    None
                }
            }
        })
        .collect()
}

/// Detail for the first well-formed monitor whose id matches `id`.
///
/// Returns `None` when no such monitor exists.
pub fn find_detail(payload: &RawPayload, id: &str, now: DateTime<Utc>) -> Option<MonitorReport> {
    payload.monitors.iter().find_map(|value| {
        let raw = match decode_monitor(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Skipping monitor {}: {}", describe_id(value), e);
                return None;
            }
        };

        if monitor_id(&raw.id).ok().as_deref() != Some(id) {
            return None;
        }

        match detail(&raw, now) {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!("Skipping monitor {}: {}", id, e);
                None
            }
        }
    })
}

fn monitor_id(value: &Value) -> Result<String, NormalizeError> {
    match value {
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        other => Err(NormalizeError::malformed("id", format!("unusable id {}", other))),
    }
}

fn parse_ratio(value: &Value) -> Result<f64, NormalizeError> {
    let ratio = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Null => Some(0.0),
        _ => None,
    };

    match ratio {
        Some(r) if (0.0..=100.0).contains(&r) => Ok(r),
        _ => Err(NormalizeError::malformed(
            "all_time_uptime_ratio",
            format!("not a percentage: {}", value),
        )),
    }
}

fn describe_id(value: &Value) -> String {
    value
        .get("id")
        .map(|id| id.to_string())
        .unwrap_or_else(|| "without id".to_string())
}
