//! Raw payload types as returned by the uptime API.
//!
//! Every field is optional or lenient. Conversion into the strict display
//! records happens in the `monitor` module.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level `getMonitors` response.
///
/// Monitors are kept as untyped JSON so each one can be decoded on its own
/// and a single bad entry does not sink the whole response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPayload {
    #[serde(default)]
    pub stat: Option<String>,
    #[serde(default)]
    pub error: Option<RawApiError>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub monitors: Vec<Value>,
}

impl RawPayload {
    /// Whether the upstream status indicator reports success.
    pub fn is_ok(&self) -> bool {
        self.stat.as_deref() == Some("ok")
    }

    /// Human-readable reason for a failed response.
    pub fn failure_message(&self) -> String {
        let detail = self.error.as_ref().and_then(|e| e.message.clone().or_else(|| e.kind.clone()));
        match (self.stat.as_deref(), detail) {
            (_, Some(detail)) => detail,
            (Some(stat), None) => format!("upstream returned stat={}", stat),
            (None, None) => "upstream response missing stat".to_string(),
        }
    }
}

/// Error object attached to a `stat: "fail"` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawApiError {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// One monitor object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMonitor {
    /// Numeric or string identifier.
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Integer code; any other shape decodes as `None`.
    #[serde(default, deserialize_with = "integer_only")]
    pub status: Option<i64>,
    /// Decimal string (sometimes a bare number).
    #[serde(default)]
    pub all_time_uptime_ratio: Option<Value>,
    /// Dash-delimited `r1-r7-r30-r90`.
    #[serde(default)]
    pub custom_uptime_ratio: Option<String>,
    /// Underscore-delimited per-day ratios.
    #[serde(default)]
    pub custom_uptime_ranges: Option<String>,
    /// Epoch seconds.
    #[serde(default, deserialize_with = "lenient_int")]
    pub last_check: Option<i64>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub response_times: Vec<RawResponseTime>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub logs: Vec<RawLog>,
}

/// A single response-time sample.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResponseTime {
    #[serde(default, deserialize_with = "lenient_int")]
    pub datetime: Option<i64>,
    #[serde(default)]
    pub value: Option<Value>,
}

/// A single state-transition log entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLog {
    #[serde(rename = "type", default, deserialize_with = "lenient_int")]
    pub kind: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub datetime: Option<i64>,
    #[serde(default)]
    pub reason: Option<RawReason>,
}

/// Reason attached to a log entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawReason {
    Text(String),
    Structured {
        #[serde(default)]
        code: Option<Value>,
        #[serde(default)]
        detail: Option<String>,
    },
    Other(Value),
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Integer from a number or numeric string; floats are truncated.
fn coerce_int(value: &Value) -> Option<i64> {
    let n = match value {
        Value::Number(n) => return n.as_i64().or_else(|| n.as_f64().and_then(float_to_int)),
        Value::String(s) => s.trim(),
        _ => return None,
    };
    n.parse::<i64>()
        .ok()
        .or_else(|| n.parse::<f64>().ok().and_then(float_to_int))
}

fn float_to_int(f: f64) -> Option<i64> {
    (f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64).then(|| f.trunc() as i64)
}

fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.as_ref().and_then(coerce_int))
}

fn integer_only<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(|v| v.as_i64()))
}

/// Decode list entries one at a time, dropping the ones that do not fit.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .filter_map(|entry| match T::deserialize(entry) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!("Dropping malformed list entry: {}", e);
                None
            }
        })
        .collect())
}
