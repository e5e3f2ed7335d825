// src/formatting.rs

use crate::core::{AlertLevel, Metadata, NormalizedAlert};
use chrono::SecondsFormat;
use serde::Serialize;

pub const DEFAULT_USERNAME: &str = "Alert Bot";
pub const DEFAULT_FOOTER: &str = "Alert Relay";
pub const DEFAULT_FOOTER_ICON: &str =
    "https://platform.slack-edge.com/img/default_application_icon.png";

/// Color and emoji used to render an alert level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelStyle {
    pub color: &'static str,
    pub icon: &'static str,
}

/// Style for levels outside the known set.
pub const DEFAULT_STYLE: LevelStyle = LevelStyle {
    color: "#808080",
    icon: ":bell:",
};

/// Looks up the style for a level string. Unknown levels get [`DEFAULT_STYLE`].
pub fn level_style(level: &str) -> LevelStyle {
    match AlertLevel::parse(level) {
        Some(AlertLevel::Info) => LevelStyle {
            color: "#36a64f",
            icon: ":information_source:",
        },
        Some(AlertLevel::Warning) => LevelStyle {
            color: "#ff9800",
            icon: ":warning:",
        },
        Some(AlertLevel::Error) => LevelStyle {
            color: "#f44336",
            icon: ":x:",
        },
        Some(AlertLevel::Critical) => LevelStyle {
            color: "#9c27b0",
            icon: ":fire:",
        },
        None => DEFAULT_STYLE,
    }
}

/// A Slack incoming-webhook message.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SlackMessage {
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(rename = "icon_emoji", skip_serializing_if = "String::is_empty")]
    pub icon: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<SlackAttachment>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SlackAttachment {
    pub color: String,
    pub title: String,
    pub text: String,
    pub fields: Vec<SlackField>,
    pub footer: String,
    pub footer_icon: String,
    pub ts: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SlackField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

impl SlackField {
    fn new(title: &str, value: impl Into<String>, short: bool) -> Self {
        Self {
            title: title.to_string(),
            value: value.into(),
            short,
        }
    }
}

/// Presentation settings that do not depend on the alert.
#[derive(Debug, Clone, PartialEq)]
pub struct SlackMessageOptions {
    pub username: String,
    pub footer: String,
    pub footer_icon: String,
}

impl Default for SlackMessageOptions {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            footer: DEFAULT_FOOTER.to_string(),
            footer_icon: DEFAULT_FOOTER_ICON.to_string(),
        }
    }
}

/// Builds the webhook message for a single alert.
pub fn build_slack_message(alert: &NormalizedAlert, options: &SlackMessageOptions) -> SlackMessage {
    let style = level_style(alert.level());

    let mut fields = vec![
        SlackField::new("Service", alert.service(), true),
        SlackField::new("Level", alert.level(), true),
        SlackField::new("Message ID", alert.id(), false),
    ];
    if let Some(metadata) = alert.non_empty_metadata() {
        fields.push(SlackField::new(
            "Metadata",
            format!("```{}```", pretty_metadata(metadata)),
            false,
        ));
    }

    SlackMessage {
        text: format!(
            "{} {} alert from {}",
            style.icon,
            alert.level(),
            alert.service()
        ),
        username: options.username.clone(),
        icon: style.icon.to_string(),
        attachments: vec![SlackAttachment {
            color: style.color.to_string(),
            title: format!("{} Alert from {}", alert.level(), alert.service()),
            text: alert.message().to_string(),
            fields,
            footer: options.footer.clone(),
            footer_icon: options.footer_icon.clone(),
            ts: alert.timestamp().timestamp(),
        }],
    }
}

/// Renders the multi-line block the console notifier prints.
pub fn format_console(alert: &NormalizedAlert) -> String {
    let mut lines = vec![
        "=== ALERT ===".to_string(),
        format!("Level: {}", alert.level()),
        format!("Service: {}", alert.service()),
        format!("Message: {}", alert.message()),
        format!(
            "Timestamp: {}",
            alert.timestamp().to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
        format!("MessageID: {}", alert.id()),
    ];
    if let Some(metadata) = alert.non_empty_metadata() {
        lines.push(format!("Metadata: {}", pretty_metadata(metadata)));
    }
    lines.push("=============".to_string());
    lines.join("\n")
}

/// Two-space indented JSON rendering of the metadata block.
fn pretty_metadata(metadata: &Metadata) -> String {
    // A map of JSON values always serializes.
    serde_json::to_string_pretty(metadata).unwrap_or_default()
}
