//! Event reconstruction from the upstream transition log.
//!
//! Each log entry is a point-in-time transition. Down events get an outage
//! duration by pairing them with the next Up entry later in the same log,
//! or with the current time if the monitor has not recovered.

use crate::upstream::{RawLog, RawReason};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Direction of a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Up,
    Down,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Up => "up",
            EventKind::Down => "down",
        }
    }
}

/// One normalized state transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub kind: EventKind,
    pub title: &'static str,
    pub occurred_at: DateTime<Utc>,
    /// Whole minutes until recovery; only set for Down events.
    pub duration_minutes: Option<i64>,
    pub duration_text: Option<String>,
    pub detail_text: Option<String>,
}

/// Kind and title for a log type code.
///
/// Unmapped codes count as Down so an unexplained transition is never
/// reported as healthy.
pub fn classify_log_type(code: Option<i64>) -> (EventKind, &'static str) {
    match code {
        Some(1) => (EventKind::Down, "Down"),
        Some(2) => (EventKind::Up, "Running again"),
        Some(98) => (EventKind::Up, "Started"),
        Some(99) => (EventKind::Down, "Paused"),
        _ => (EventKind::Down, "Unknown"),
    }
}

/// Build events from raw log entries, preserving their order.
///
/// Entries without a usable timestamp are dropped.
pub fn reconstruct_events(logs: &[RawLog], now: DateTime<Utc>) -> Vec<Event> {
    let mut events: Vec<Event> = logs
        .iter()
        .filter_map(|log| {
            let occurred_at = match log.datetime.and_then(super::timestamp_from_epoch) {
                Some(t) => t,
                None => {
                    tracing::warn!("Dropping log entry with invalid timestamp {:?}", log.datetime);
                    return None;
                }
            };
            let (kind, title) = classify_log_type(log.kind);
            Some(Event {
                kind,
                title,
                occurred_at,
                duration_minutes: None,
                duration_text: None,
                detail_text: normalize_reason(log.reason.as_ref()),
            })
        })
        .collect();

    // Walk backwards carrying the nearest Up seen so far.
    let mut next_up: Option<DateTime<Utc>> = None;
    for event in events.iter_mut().rev() {
        match event.kind {
            EventKind::Down => {
                let recovery = next_up.unwrap_or(now);
                let minutes = outage_minutes(event.occurred_at, recovery);
                event.duration_minutes = Some(minutes);
                event.duration_text = Some(format_duration(minutes));
            }
            EventKind::Up => next_up = Some(event.occurred_at),
        }
    }

    events
}

/// Whole minutes between two instants. Inverted timestamps are clamped to
/// their absolute difference.
fn outage_minutes(down: DateTime<Utc>, recovery: DateTime<Utc>) -> i64 {
    (recovery - down).num_seconds().abs() / 60
}

/// Human-readable duration.
pub fn format_duration(minutes: i64) -> String {
    let minutes = minutes.max(0);
    if minutes < 60 {
        return format!("{} min", minutes);
    }

    if minutes < 24 * 60 {
        return format!("{}h, {}min", minutes / 60, minutes % 60);
    }

    let days = minutes / (24 * 60);
    let hours = (minutes % (24 * 60)) / 60;
    if hours == 0 {
        format!("{} days", days)
    } else {
        format!("{} days, {}h", days, hours)
    }
}

/// Flatten a raw reason to display text.
///
/// Structured reasons become `"<code>: <detail>"`; empty reasons are `None`.
pub fn normalize_reason(reason: Option<&RawReason>) -> Option<String> {
    let text = match reason? {
        RawReason::Text(s) => s.clone(),
        RawReason::Structured { code, detail } => {
            let code = code.as_ref().map(value_text).unwrap_or_default();
            let detail = detail.as_deref().unwrap_or_default().trim();
            match (code.is_empty(), detail.is_empty()) {
                (false, false) => format!("{}: {}", code, detail),
                (false, true) => code,
                (true, false) => detail.to_string(),
                (true, true) => String::new(),
            }
        }
        RawReason::Other(value) => value_text(value),
    };

    (!text.trim().is_empty()).then_some(text)
}

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn log(kind: i64, datetime: i64) -> RawLog {
        RawLog {
            kind: Some(kind),
            datetime: Some(datetime),
            reason: None,
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_down_then_up() {
        let events = reconstruct_events(&[log(1, 1000), log(2, 1600)], at(5000));
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, EventKind::Down);
        assert_eq!(events[0].duration_minutes, Some(10));
        assert_eq!(events[0].duration_text.as_deref(), Some("10 min"));
        assert_eq!(events[1].kind, EventKind::Up);
        assert_eq!(events[1].duration_minutes, None);
    }

    #[test]
    fn test_down_without_recovery_uses_now() {
        let now = at(0) + Duration::minutes(90);
        let events = reconstruct_events(&[log(1, 0)], now);
        assert_eq!(events[0].duration_minutes, Some(90));

        let events = reconstruct_events(&[log(1, 0)], Utc::now());
        assert!(events[0].duration_minutes.unwrap() >= 0);
    }

    #[test]
    fn test_each_down_pairs_with_nearest_following_up() {
        // down@0, down@600, up@1200, down@1800, up@3000
        let logs = [log(1, 0), log(1, 600), log(2, 1200), log(1, 1800), log(2, 3000)];
        let events = reconstruct_events(&logs, at(10_000));
        let durations: Vec<Option<i64>> = events.iter().map(|e| e.duration_minutes).collect();
        assert_eq!(durations, vec![Some(20), Some(10), None, Some(20), None]);
    }

    #[test]
    fn test_inverted_timestamps_are_clamped() {
        // Newest-first ordering puts the Up before the Down in time.
        let events = reconstruct_events(&[log(1, 1600), log(2, 1000)], at(5000));
        assert_eq!(events[0].duration_minutes, Some(10));
    }

    #[test]
    fn test_log_type_codes() {
        assert_eq!(classify_log_type(Some(1)), (EventKind::Down, "Down"));
        assert_eq!(classify_log_type(Some(2)), (EventKind::Up, "Running again"));
        assert_eq!(classify_log_type(Some(98)), (EventKind::Up, "Started"));
        assert_eq!(classify_log_type(Some(99)), (EventKind::Down, "Paused"));
        assert_eq!(classify_log_type(Some(7)), (EventKind::Down, "Unknown"));
        assert_eq!(classify_log_type(None), (EventKind::Down, "Unknown"));
    }

    #[test]
    fn test_started_code_counts_as_recovery() {
        let events = reconstruct_events(&[log(1, 0), log(98, 300)], at(10_000));
        assert_eq!(events[0].duration_minutes, Some(5));
    }

    #[test]
    fn test_entries_without_timestamp_are_dropped() {
        let logs = [
            RawLog {
                kind: Some(1),
                datetime: None,
                reason: None,
            },
            log(2, 100),
        ];
        let events = reconstruct_events(&logs, at(200));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Up);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0 min");
        assert_eq!(format_duration(59), "59 min");
        assert_eq!(format_duration(60), "1h, 0min");
        assert_eq!(format_duration(135), "2h, 15min");
        assert_eq!(format_duration(24 * 60), "1 days");
        assert_eq!(format_duration(3 * 24 * 60), "3 days");
        assert_eq!(format_duration(2 * 24 * 60 + 5 * 60 + 30), "2 days, 5h");
    }

    #[test]
    fn test_normalize_reason() {
        let structured: RawReason =
            serde_json::from_value(json!({"code": 503, "detail": "timeout"})).unwrap();
        assert_eq!(normalize_reason(Some(&structured)).as_deref(), Some("503: timeout"));

        let string_code: RawReason =
            serde_json::from_value(json!({"code": "333333", "detail": "Connection Timeout"})).unwrap();
        assert_eq!(
            normalize_reason(Some(&string_code)).as_deref(),
            Some("333333: Connection Timeout")
        );

        let code_only: RawReason = serde_json::from_value(json!({"code": "200"})).unwrap();
        assert_eq!(normalize_reason(Some(&code_only)).as_deref(), Some("200"));

        let plain = RawReason::Text("Manual pause".to_string());
        assert_eq!(normalize_reason(Some(&plain)).as_deref(), Some("Manual pause"));

        assert_eq!(normalize_reason(Some(&RawReason::Text(String::new()))), None);
        assert_eq!(normalize_reason(None), None);
    }

    #[test]
    fn test_reason_carried_on_event() {
        let logs = [RawLog {
            kind: Some(1),
            datetime: Some(0),
            reason: Some(serde_json::from_value(json!({"code": 503, "detail": "timeout"})).unwrap()),
        }];
        let events = reconstruct_events(&logs, at(60));
        assert_eq!(events[0].detail_text.as_deref(), Some("503: timeout"));
    }
}
