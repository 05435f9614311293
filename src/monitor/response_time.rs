//! Response-time aggregation.

use crate::upstream::RawResponseTime;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// One `(timestamp, value)` sample, kept in upstream order for charting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseTimeSample {
    pub timestamp: Option<DateTime<Utc>>,
    /// Milliseconds; `None` when upstream sent nothing usable.
    pub value: Option<f64>,
}

/// Aggregates over the numeric samples plus the samples themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseTimeStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
    pub data: Vec<ResponseTimeSample>,
}

impl Default for ResponseTimeStats {
    fn default() -> Self {
        Self {
            avg: 0.0,
            min: 0.0,
            max: 0.0,
            data: Vec::new(),
        }
    }
}

/// Aggregate raw samples. Missing or non-numeric values are skipped.
pub fn aggregate_response_times(raw: &[RawResponseTime]) -> ResponseTimeStats {
    let data: Vec<ResponseTimeSample> = raw
        .iter()
        .map(|rt| ResponseTimeSample {
            timestamp: rt.datetime.and_then(super::timestamp_from_epoch),
            value: rt.value.as_ref().and_then(numeric_value),
        })
        .collect();

    let values: Vec<f64> = data.iter().filter_map(|s| s.value).collect();
    if values.is_empty() {
        return ResponseTimeStats {
            data,
            ..Default::default()
        };
    }

    let sum: f64 = values.iter().sum();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    ResponseTimeStats {
        avg: sum / values.len() as f64,
        min,
        max,
        data,
    }
}

fn numeric_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}
