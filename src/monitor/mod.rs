//! Monitor normalization.
//!
//! Turns raw upstream payloads into the strict display records used by the
//! web layer. Nothing downstream of this module sees raw JSON.

mod events;
mod models;
mod normalize;
mod ratio;
mod response_time;
mod status;

pub use events::*;
pub use models::*;
pub use normalize::*;
pub use ratio::*;
pub use response_time::*;
pub use status::*;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Normalization error types.
#[derive(Error, Debug, PartialEq)]
pub enum NormalizeError {
    #[error("malformed field `{field}`: {reason}")]
    MalformedField { field: &'static str, reason: String },
}

impl NormalizeError {
    fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        NormalizeError::MalformedField {
            field,
            reason: reason.into(),
        }
    }
}

/// Convert upstream epoch seconds. Negative or out-of-range values are `None`.
pub(crate) fn timestamp_from_epoch(secs: i64) -> Option<DateTime<Utc>> {
    if secs < 0 {
        return None;
    }
    DateTime::from_timestamp(secs, 0)
}
