//! Delivers alerts to notification channels.
//!
//! Two notifiers implement [`Notifier`]: a Slack incoming-webhook client and a
//! console writer used when no webhook is configured. The choice is made once
//! at start-up by [`from_config`].
pub mod console;
pub mod slack;

use crate::config::WebhookConfig;
use crate::core::Notifier;
use crate::formatting::SlackMessageOptions;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

pub use console::ConsoleNotifier;
pub use slack::SlackNotifier;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook returned non-OK status: {code}, body: {body}")]
    NonOkStatus { code: u16, body: String },
}

/// Picks the notifier for this process: Slack when a webhook URL is set,
/// console otherwise.
pub fn from_config(config: &WebhookConfig) -> anyhow::Result<Arc<dyn Notifier>> {
    match config.effective_url() {
        Some(url) => {
            info!("Slack webhook configured, alerts will be posted to Slack.");
            let options = SlackMessageOptions {
                username: config.username.clone(),
                footer: config.footer.clone(),
                footer_icon: config.footer_icon.clone(),
            };
            Ok(Arc::new(SlackNotifier::new(url.to_string(), options)?))
        }
        None => {
            warn!("No webhook URL configured, using console notifier.");
            Ok(Arc::new(ConsoleNotifier::new()))
        }
    }
}
