//! Parsers for the delimited ratio encodings used by the uptime API.
//!
//! - `"r1-r7-r30-r90"`: dash-delimited uptime per trailing window.
//! - `"r_r_r..."`: underscore-delimited per-day ratios for the history bar.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Trailing windows, in days, in upstream order.
pub const WINDOW_DAYS: [u32; 4] = [1, 7, 30, 90];

/// Value substituted for a missing or malformed window.
pub const DEFAULT_WINDOW_RATIO: f64 = 0.0;

/// A day counts as up at or above this ratio.
pub const DAY_UP_THRESHOLD: f64 = 99.9;

/// Length of the history when upstream sends nothing.
pub const DEFAULT_HISTORY_LEN: usize = 90;

/// Uptime percentage per trailing window. All four windows are always present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UptimeWindows {
    ratios: [f64; 4],
}

impl Default for UptimeWindows {
    fn default() -> Self {
        Self {
            ratios: [DEFAULT_WINDOW_RATIO; 4],
        }
    }
}

impl UptimeWindows {
    /// Ratio for a window in days; `None` for anything but 1, 7, 30 or 90.
    pub fn get(&self, days: u32) -> Option<f64> {
        WINDOW_DAYS
            .iter()
            .position(|&d| d == days)
            .map(|i| self.ratios[i])
    }

    /// `(days, ratio)` pairs in window order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        WINDOW_DAYS.iter().copied().zip(self.ratios.iter().copied())
    }
}

impl Serialize for UptimeWindows {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(WINDOW_DAYS.len()))?;
        for (days, ratio) in self.iter() {
            map.serialize_entry(&days.to_string(), &ratio)?;
        }
        map.end()
    }
}

/// Parse a dash-delimited window string.
///
/// Missing or empty positions take the default; malformed tokens are logged
/// and take the default without affecting the other windows.
pub fn parse_uptime_windows(encoded: &str) -> UptimeWindows {
    let mut windows = UptimeWindows::default();
    if encoded.trim().is_empty() {
        return windows;
    }

    let tokens: Vec<&str> = encoded.split('-').collect();
    for (i, days) in WINDOW_DAYS.iter().enumerate() {
        let token = match tokens.get(i).map(|t| t.trim()) {
            Some(t) if !t.is_empty() => t,
            _ => continue,
        };

        match token.parse::<f64>() {
            Ok(ratio) if (0.0..=100.0).contains(&ratio) => windows.ratios[i] = ratio,
            _ => {
                tracing::warn!("Ignoring malformed {}-day uptime ratio {:?}", days, token);
            }
        }
    }

    windows
}

/// Outcome of one day in the history bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Up,
    Down,
}

impl DayStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DayStatus::Up => "up",
            DayStatus::Down => "down",
        }
    }
}

/// Parse an underscore-delimited day-by-day history.
///
/// An empty or absent encoding yields [`DEFAULT_HISTORY_LEN`] down days.
/// A malformed token counts as down.
pub fn parse_daily_history(encoded: Option<&str>) -> Vec<DayStatus> {
    let encoded = match encoded.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return vec![DayStatus::Down; DEFAULT_HISTORY_LEN],
    };

    encoded
        .split('_')
        .map(|token| match token.trim().parse::<f64>() {
            Ok(ratio) if ratio >= DAY_UP_THRESHOLD => DayStatus::Up,
            Ok(_) => DayStatus::Down,
            Err(_) => {
                tracing::warn!("Treating malformed daily ratio {:?} as down", token);
                DayStatus::Down
            }
        })
        .collect()
}
