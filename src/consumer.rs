//! Turns raw queue records into validated alerts.

use crate::core::{Metadata, NormalizedAlert, RawRecord};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::de::{Error as _, Unexpected};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// RFC 3339 with a numeric UTC offset.
const OFFSET_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";
/// RFC 3339 in UTC, written with a trailing `Z`.
const UTC_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
/// Format accepted for timestamps that carry no UTC offset.
const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to decode message body: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("alert {0} is required")]
    MissingField(&'static str),
}

/// The alert payload as it appears in a message body.
#[derive(Debug, Default, Deserialize)]
struct AlertPayload {
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    service: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    metadata: Option<Metadata>,
}

/// Parses a queue record into a [`NormalizedAlert`].
///
/// Required fields are checked in the order level, service, message and the
/// first missing one is reported. A timestamp that is absent or cannot be
/// parsed is replaced by the current time.
pub fn parse_record(record: &RawRecord) -> Result<NormalizedAlert, ParseError> {
    let payload: AlertPayload = match serde_json::from_str::<Value>(&record.body)? {
        Value::Null => AlertPayload::default(),
        value @ Value::Object(_) => serde_json::from_value(value)?,
        other => {
            return Err(ParseError::Malformed(serde_json::Error::invalid_type(
                unexpected(&other),
                &"a JSON object",
            )))
        }
    };

    NormalizedAlert::new(
        payload.level.unwrap_or_default(),
        payload.service.unwrap_or_default(),
        payload.message.unwrap_or_default(),
        resolve_timestamp(payload.timestamp.as_deref()),
        record.message_id.clone(),
        payload.metadata,
    )
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Null | Value::Object(_) => Unexpected::Other("value"),
    }
}

/// Resolves the alert time, falling back to now for missing or bad input.
pub fn resolve_timestamp(raw: Option<&str>) -> DateTime<FixedOffset> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Utc::now().fixed_offset(),
    };

    // Only the `T` separator and an upper-case `Z` are accepted.
    if let Ok(ts) = DateTime::parse_from_str(raw, OFFSET_TIMESTAMP_FORMAT) {
        return ts;
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, UTC_TIMESTAMP_FORMAT) {
        return naive.and_utc().fixed_offset();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, NAIVE_TIMESTAMP_FORMAT) {
        return naive.and_utc().fixed_offset();
    }

    debug!(timestamp = %raw, "Unparseable alert timestamp, using current time");
    Utc::now().fixed_offset()
}
