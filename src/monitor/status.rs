//! Status code lookup tables.

use serde::Serialize;
use std::fmt;

/// Monitor state as reported by the upstream status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorStatus {
    Paused,
    NotCheckedYet,
    Up,
    SeemsDown,
    Down,
    Unknown,
}

/// Presentation hint for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Secondary,
    Info,
    Success,
    Warning,
    Danger,
}

impl MonitorStatus {
    /// Map an upstream status code. Unrecognized codes are `Unknown`.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => MonitorStatus::Paused,
            1 => MonitorStatus::NotCheckedYet,
            2 => MonitorStatus::Up,
            8 => MonitorStatus::SeemsDown,
            9 => MonitorStatus::Down,
            _ => MonitorStatus::Unknown,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            MonitorStatus::Paused => "Paused",
            MonitorStatus::NotCheckedYet => "Not checked yet",
            MonitorStatus::Up => "Up",
            MonitorStatus::SeemsDown => "Seems down",
            MonitorStatus::Down => "Down",
            MonitorStatus::Unknown => "Unknown",
        }
    }

    pub fn class(self) -> StatusClass {
        match self {
            MonitorStatus::Paused => StatusClass::Secondary,
            MonitorStatus::NotCheckedYet => StatusClass::Info,
            MonitorStatus::Up => StatusClass::Success,
            MonitorStatus::SeemsDown => StatusClass::Warning,
            MonitorStatus::Down => StatusClass::Danger,
            MonitorStatus::Unknown => StatusClass::Secondary,
        }
    }
}

impl StatusClass {
    /// CSS class suffix used by the templates.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusClass::Secondary => "secondary",
            StatusClass::Info => "info",
            StatusClass::Success => "success",
            StatusClass::Warning => "warning",
            StatusClass::Danger => "danger",
        }
    }
}

impl fmt::Display for MonitorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readable text for a raw status code.
pub fn status_text(code: i64) -> &'static str {
    MonitorStatus::from_code(code).text()
}

/// Presentation class for a raw status code.
pub fn status_class(code: i64) -> StatusClass {
    MonitorStatus::from_code(code).class()
}
