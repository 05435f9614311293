//! Display records produced by the normalizer.

use super::{DayStatus, Event, MonitorStatus, ResponseTimeStats, StatusClass, UptimeWindows};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Placeholder shown when a timestamp is missing or invalid.
pub const NOT_AVAILABLE: &str = "N/A";

/// Fallback label for monitors without a friendly name.
pub const UNNAMED_MONITOR: &str = "Unnamed Monitor";

/// One row on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorSummary {
    pub id: String,
    pub name: String,
    pub url: String,
    pub status: MonitorStatus,
    pub status_text: &'static str,
    /// Derived from `status` only.
    pub status_class: StatusClass,
    /// Percentage in [0, 100].
    pub uptime_ratio: f64,
    pub last_checked_at: Option<DateTime<Utc>>,
    /// `last_checked_at` formatted for display, or `N/A`.
    pub last_check: String,
}

impl MonitorSummary {
    pub fn is_up(&self) -> bool {
        self.status == MonitorStatus::Up
    }
}

/// A monitor with its windowed uptime, history and response times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorDetail {
    #[serde(flatten)]
    pub summary: MonitorSummary,
    pub uptime_by_window: UptimeWindows,
    pub daily_history: Vec<DayStatus>,
    pub response_time_stats: ResponseTimeStats,
}

/// Payload of the detail operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorReport {
    pub monitor: MonitorDetail,
    pub events: Vec<Event>,
}

/// Format a timestamp the way the dashboard shows it.
pub fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}
