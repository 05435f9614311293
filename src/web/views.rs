//! View models for the HTML pages.
//!
//! Numbers and timestamps are formatted here so the templates stay dumb.

use crate::monitor::{format_timestamp, Event, MonitorReport, MonitorSummary};

use askama::Template;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct MonitorRow {
    pub id: String,
    pub name: String,
    pub url: String,
    pub status_text: &'static str,
    pub status_class: &'static str,
    pub uptime: String,
    pub last_check: String,
    pub is_up: bool,
}

impl From<&MonitorSummary> for MonitorRow {
    fn from(m: &MonitorSummary) -> Self {
        Self {
            id: m.id.clone(),
            name: m.name.clone(),
            url: m.url.clone(),
            status_text: m.status_text,
            status_class: m.status_class.as_str(),
            uptime: format!("{:.3}", m.uptime_ratio),
            last_check: m.last_check.clone(),
            is_up: m.is_up(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WindowRow {
    pub label: String,
    pub ratio: String,
}

#[derive(Debug, Clone)]
pub struct EventRow {
    pub kind: &'static str,
    pub title: &'static str,
    pub occurred_at: String,
    pub duration: String,
    pub detail: String,
}

impl From<&Event> for EventRow {
    fn from(e: &Event) -> Self {
        Self {
            kind: e.kind.as_str(),
            title: e.title,
            occurred_at: format_timestamp(Some(e.occurred_at)),
            duration: e.duration_text.clone().unwrap_or_default(),
            detail: e.detail_text.clone().unwrap_or_default(),
        }
    }
}

// ============================================================================
// Templates
// ============================================================================

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub title: String,
    pub generated_at: String,
    pub error: String,
    pub monitors: Vec<MonitorRow>,
}

impl IndexPage {
    pub fn new(monitors: &[MonitorSummary], now: DateTime<Utc>) -> Self {
        Self {
            title: "Service Status".to_string(),
            generated_at: generated_at(now),
            error: String::new(),
            monitors: monitors.iter().map(MonitorRow::from).collect(),
        }
    }

    pub fn all_up(&self) -> bool {
        !self.monitors.is_empty() && self.monitors.iter().all(|m| m.is_up)
    }
}

#[derive(Template)]
#[template(path = "monitor_detail.html")]
pub struct DetailPage {
    pub title: String,
    pub generated_at: String,
    pub monitor: MonitorRow,
    pub windows: Vec<WindowRow>,
    pub history: Vec<&'static str>,
    pub rt_avg: String,
    pub rt_min: String,
    pub rt_max: String,
    /// `[[epoch, ms], ...]` for the sparkline, oldest first.
    pub samples_json: String,
    pub events: Vec<EventRow>,
}

impl DetailPage {
    pub fn new(report: &MonitorReport, now: DateTime<Utc>) -> Self {
        let detail = &report.monitor;
        let stats = &detail.response_time_stats;

        let mut points: Vec<(i64, f64)> = stats
            .data
            .iter()
            .filter_map(|s| Some((s.timestamp?.timestamp(), s.value?)))
            .collect();
        points.sort_by_key(|(ts, _)| *ts);

        Self {
            title: format!("{} - Service Status", detail.summary.name),
            generated_at: generated_at(now),
            monitor: MonitorRow::from(&detail.summary),
            windows: detail
                .uptime_by_window
                .iter()
                .map(|(days, ratio)| WindowRow {
                    label: if days == 1 {
                        "24 hours".to_string()
                    } else {
                        format!("{} days", days)
                    },
                    ratio: format!("{:.3}", ratio),
                })
                .collect(),
            history: detail.daily_history.iter().map(|d| d.as_str()).collect(),
            rt_avg: format!("{:.0}", stats.avg),
            rt_min: format!("{:.0}", stats.min),
            rt_max: format!("{:.0}", stats.max),
            samples_json: serde_json::to_string(&points).unwrap_or_else(|_| "[]".to_string()),
            events: report.events.iter().map(EventRow::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub title: String,
    pub generated_at: String,
    pub error: String,
}

impl ErrorPage {
    pub fn new(error: &str, now: DateTime<Utc>) -> Self {
        Self {
            title: "Service Status".to_string(),
            generated_at: generated_at(now),
            error: error.to_string(),
        }
    }
}

fn generated_at(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
