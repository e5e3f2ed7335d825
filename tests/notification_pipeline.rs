//! End-to-end tests for batch handling: records in, notifications out.

mod helpers;

use alertrelay::consumer::ParseError;
use alertrelay::config::WebhookConfig;
use alertrelay::handler::{handle_batch, BatchError};
use alertrelay::notification::{self, DispatchError};
use alertrelay::RawRecord;
use chrono::{DateTime, Utc};
use helpers::mock_notifier::MockNotifier;
use helpers::valid_record;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_record_with_timestamp_keeps_it() {
    let notifier = MockNotifier::new();
    let records = vec![RawRecord::new(
        "test-message-1",
        r#"{"level":"info","service":"test-service","message":"Test message","timestamp":"2025-11-28T10:00:00Z"}"#,
    )];

    handle_batch(&records, &notifier).await.unwrap();

    let sent = notifier.get_sent_alerts();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].id(), "test-message-1");
    assert_eq!(
        sent[0].timestamp(),
        DateTime::parse_from_rfc3339("2025-11-28T10:00:00Z").unwrap()
    );
}

#[tokio::test]
async fn test_record_without_timestamp_uses_now() {
    let notifier = MockNotifier::new();
    let records = vec![RawRecord::new(
        "test-message-2",
        r#"{"level":"error","service":"test-service","message":"Error occurred"}"#,
    )];

    handle_batch(&records, &notifier).await.unwrap();

    let sent = notifier.get_sent_alerts();
    let age = Utc::now().signed_duration_since(sent[0].timestamp());
    assert!(age.num_seconds().abs() < 5, "timestamp too far from now: {}", age);
}

#[tokio::test]
async fn test_missing_level_produces_no_alert() {
    let notifier = MockNotifier::new();
    let records = vec![RawRecord::new(
        "test-message-3",
        r#"{"service":"test-service","message":"Test message"}"#,
    )];

    let err = handle_batch(&records, &notifier).await.unwrap_err();

    assert!(matches!(
        err,
        BatchError::Parse {
            source: ParseError::MissingField("level"),
            ..
        }
    ));
    assert!(notifier.get_sent_alerts().is_empty());
}

#[tokio::test]
async fn test_invalid_json_is_malformed() {
    let notifier = MockNotifier::new();
    let records = vec![RawRecord::new("test-message-4", "{invalid json}")];

    let err = handle_batch(&records, &notifier).await.unwrap_err();

    assert!(matches!(
        err,
        BatchError::Parse {
            source: ParseError::Malformed(_),
            ..
        }
    ));
}

#[tokio::test]
async fn test_webhook_error_status_fails_batch() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(500).set_body_string("no_service"))
        .expect(1)
        .mount(&server)
        .await;

    let notifier = notification::from_config(&WebhookConfig {
        url: Some(format!("{}/hook", server.uri())),
        ..Default::default()
    })
    .unwrap();
    let records = vec![valid_record("m-1", "critical"), valid_record("m-2", "info")];

    // Act
    let err = handle_batch(&records, notifier.as_ref()).await.unwrap_err();

    // Assert
    assert_eq!(err.message_id(), "m-1");
    match err {
        BatchError::Dispatch {
            source: DispatchError::NonOkStatus { code, body },
            ..
        } => {
            assert_eq!(code, 500);
            assert_eq!(body, "no_service");
        }
        other => panic!("expected a NonOkStatus dispatch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_webhook_receives_every_record_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(3)
        .mount(&server)
        .await;

    let notifier = notification::from_config(&WebhookConfig {
        url: Some(format!("{}/hook", server.uri())),
        ..Default::default()
    })
    .unwrap();
    let records = vec![
        valid_record("m-1", "info"),
        valid_record("m-2", "warning"),
        valid_record("m-3", "unknown"),
    ];

    let summary = handle_batch(&records, notifier.as_ref()).await.unwrap();
    assert_eq!(summary.processed, 3);

    let requests = server.received_requests().await.unwrap();
    let colors: Vec<String> = requests
        .iter()
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["attachments"][0]["color"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(colors, vec!["#36a64f", "#ff9800", "#808080"]);
}

#[tokio::test]
async fn test_parse_failure_stops_before_later_records() {
    let notifier = MockNotifier::new();
    let records = vec![
        valid_record("m-1", "info"),
        RawRecord::new("m-2", r#"{"level":"info","message":"no service"}"#),
        valid_record("m-3", "info"),
    ];

    let err = handle_batch(&records, &notifier).await.unwrap_err();

    assert_eq!(err.message_id(), "m-2");
    let ids: Vec<String> = notifier
        .get_sent_alerts()
        .iter()
        .map(|a| a.id().to_string())
        .collect();
    assert_eq!(ids, vec!["m-1"]);
}
