//! A client for sending alerts to a Slack incoming webhook.

use crate::core::{NormalizedAlert, Notifier};
use crate::formatting::{build_slack_message, SlackMessageOptions};
use crate::notification::DispatchError;
use async_trait::async_trait;
use reqwest::{redirect, Client, StatusCode};
use std::time::Duration;
use tracing::{error, info, instrument};

/// Upper bound on a single webhook request.
pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts each alert as a Slack message with a colored attachment.
pub struct SlackNotifier {
    webhook_url: String,
    options: SlackMessageOptions,
    client: Client,
}

impl SlackNotifier {
    /// Creates a new `SlackNotifier` with the default request timeout.
    pub fn new(webhook_url: String, options: SlackMessageOptions) -> Result<Self, reqwest::Error> {
        Self::with_timeout(webhook_url, options, WEBHOOK_TIMEOUT)
    }

    /// Creates a new `SlackNotifier` with a custom request timeout.
    ///
    /// Redirects are not followed; a 3xx response is a failed delivery.
    pub fn with_timeout(
        webhook_url: String,
        options: SlackMessageOptions,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()?;
        Ok(Self {
            webhook_url,
            options,
            client,
        })
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    fn name(&self) -> &str {
        "slack"
    }

    /// Formats and posts the alert to the configured webhook.
    #[instrument(skip(self, alert), fields(message_id = %alert.id(), level = %alert.level()))]
    async fn send_alert(&self, alert: &NormalizedAlert) -> Result<(), DispatchError> {
        let payload = build_slack_message(alert, &self.options);

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "HTTP request to Slack failed");
                DispatchError::Transport(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                body = %body,
                "Failed to send Slack notification"
            );
            return Err(DispatchError::NonOkStatus {
                code: status.as_u16(),
                body,
            });
        }

        info!("Successfully sent alert to Slack.");
        Ok(())
    }
}
