//! Shared fixtures for integration tests.

#![allow(dead_code)]

pub mod mock_notifier;

use alertrelay::RawRecord;

/// A record whose body is a well-formed alert.
pub fn valid_record(id: &str, level: &str) -> RawRecord {
    RawRecord::new(
        id,
        format!(
            r#"{{"level":"{}","service":"test-service","message":"Test message","timestamp":"2025-11-28T10:00:00Z"}}"#,
            level
        ),
    )
}

/// Wraps records in the queue event envelope the binary reads.
pub fn event_json(records: &[RawRecord]) -> String {
    serde_json::to_string(&alertrelay::QueueEvent {
        records: records.to_vec(),
    })
    .unwrap()
}
