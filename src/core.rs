//! Core domain types and service traits for AlertRelay
//!
//! This module defines the queue records that come in, the normalized alert
//! that flows through the pipeline, and the trait contract every notification
//! sink implements.

use crate::consumer::ParseError;
use crate::notification::DispatchError;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single message as delivered by the queue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RawRecord {
    /// Opaque identifier assigned by the queue
    #[serde(rename = "messageId")]
    pub message_id: String,
    /// Message body, expected to be a JSON alert payload
    #[serde(default)]
    pub body: String,
}

impl RawRecord {
    pub fn new(message_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            body: body.into(),
        }
    }
}

/// The batch envelope handed to one invocation.
///
/// Mirrors the shape of an SQS event; attributes other than `messageId` and
/// `body` are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QueueEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<RawRecord>,
}

/// Free-form structured data attached to an alert.
pub type Metadata = Map<String, Value>;

/// An alert after parsing and validation.
///
/// `level`, `service` and `message` are guaranteed to be non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAlert {
    level: String,
    service: String,
    message: String,
    timestamp: DateTime<FixedOffset>,
    id: String,
    metadata: Option<Metadata>,
}

impl NormalizedAlert {
    /// Builds an alert, rejecting empty required fields in the order
    /// level, service, message.
    pub fn new(
        level: impl Into<String>,
        service: impl Into<String>,
        message: impl Into<String>,
        timestamp: DateTime<FixedOffset>,
        id: impl Into<String>,
        metadata: Option<Metadata>,
    ) -> Result<Self, ParseError> {
        let level = level.into();
        let service = service.into();
        let message = message.into();

        if level.is_empty() {
            return Err(ParseError::MissingField("level"));
        }
        if service.is_empty() {
            return Err(ParseError::MissingField("service"));
        }
        if message.is_empty() {
            return Err(ParseError::MissingField("message"));
        }

        Ok(Self {
            level,
            service,
            message,
            timestamp,
            id: id.into(),
            metadata,
        })
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// The identifier of the queue record this alert was parsed from.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Returns the metadata only when it holds at least one entry.
    pub fn non_empty_metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref().filter(|m| !m.is_empty())
    }
}

/// The severity levels the notifiers know how to style.
///
/// Alerts are not restricted to these; unknown levels are carried as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertLevel {
    Info,
    Warning,
    Error,
    Critical,
}

impl AlertLevel {
    /// Case-sensitive lookup of a known level.
    pub fn parse(level: &str) -> Option<Self> {
        match level {
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// Returns true if `level` is one of the known severity levels.
pub fn is_known_level(level: &str) -> bool {
    AlertLevel::parse(level).is_some()
}

// =============================================================================
// Service Traits
// =============================================================================

/// Sends alerts to a notification destination
#[async_trait]
pub trait Notifier: Send + Sync {
    /// A short, descriptive name for the notifier (e.g., "slack", "console").
    /// Used for logging and metrics.
    fn name(&self) -> &str;

    /// Sends an alert to the configured destination
    ///
    /// # Arguments
    /// * `alert` - The alert to send
    ///
    /// # Returns
    /// * `Ok(())` if the alert was delivered
    /// * `Err` if the destination rejected it or could not be reached
    async fn send_alert(&self, alert: &NormalizedAlert) -> Result<(), DispatchError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn now() -> DateTime<FixedOffset> {
        Utc::now().fixed_offset()
    }

    #[test]
    fn test_new_rejects_empty_fields_in_order() {
        let err = NormalizedAlert::new("", "", "", now(), "id", None).unwrap_err();
        assert!(matches!(err, ParseError::MissingField("level")));

        let err = NormalizedAlert::new("info", "", "", now(), "id", None).unwrap_err();
        assert!(matches!(err, ParseError::MissingField("service")));

        let err = NormalizedAlert::new("info", "svc", "", now(), "id", None).unwrap_err();
        assert!(matches!(err, ParseError::MissingField("message")));
    }

    #[test]
    fn test_unknown_level_is_carried_verbatim() {
        let alert = NormalizedAlert::new("DEBUG", "svc", "msg", now(), "id-1", None).unwrap();
        assert_eq!(alert.level(), "DEBUG");
        assert_eq!(alert.id(), "id-1");
    }

    #[test]
    fn test_non_empty_metadata() {
        let alert =
            NormalizedAlert::new("info", "svc", "msg", now(), "id", Some(Metadata::new())).unwrap();
        assert!(alert.metadata().is_some());
        assert!(alert.non_empty_metadata().is_none());
    }

    #[test]
    fn test_is_known_level() {
        assert!(is_known_level("info"));
        assert!(is_known_level("warning"));
        assert!(is_known_level("error"));
        assert!(is_known_level("critical"));
        assert!(!is_known_level("invalid"));
        assert!(!is_known_level("INFO"));
        assert!(!is_known_level(""));
    }

    #[test]
    fn test_alert_level_parse() {
        assert_eq!(AlertLevel::parse("critical"), Some(AlertLevel::Critical));
        assert_eq!(AlertLevel::parse("Warning"), None);
    }

    #[test]
    fn test_queue_event_deserialization() {
        let json = r#"{
            "Records": [
                {"messageId": "m-1", "body": "{}", "receiptHandle": "abc", "eventSource": "aws:sqs"},
                {"messageId": "m-2", "body": "x"}
            ]
        }"#;
        let event: QueueEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event.records,
            vec![RawRecord::new("m-1", "{}"), RawRecord::new("m-2", "x")]
        );

        let empty: QueueEvent = serde_json::from_str("{}").unwrap();
        assert!(empty.records.is_empty());
    }
}
