//! Configuration management for AlertRelay
//!
//! This module defines the `Config` struct holding all application settings.
//! It uses the `figment` crate to layer defaults, an optional
//! `alertrelay.toml` file, environment variables and command-line arguments.

use crate::cli::Cli;
use crate::formatting::{DEFAULT_FOOTER, DEFAULT_FOOTER_ICON, DEFAULT_USERNAME};
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "alertrelay.toml";

/// Environment variable that holds the webhook URL in existing deployments.
pub const LEGACY_WEBHOOK_ENV: &str = "SLACK_WEBHOOK_URL";

/// The main configuration struct for the application.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// The logging level for the application.
    pub log_level: String,
    /// Configuration for the webhook notifier.
    pub webhook: WebhookConfig,
}

/// Configuration for the webhook notifier.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct WebhookConfig {
    /// The Slack incoming webhook URL. When unset, alerts go to the console.
    pub url: Option<String>,
    /// Display name of the bot posting the message.
    pub username: String,
    /// Footer text of the message attachment.
    pub footer: String,
    /// Footer icon URL of the message attachment.
    pub footer_icon: String,
}

impl WebhookConfig {
    /// The webhook URL, if one is set and non-empty.
    pub fn effective_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            username: DEFAULT_USERNAME.to_string(),
            footer: DEFAULT_FOOTER.to_string(),
            footer_icon: DEFAULT_FOOTER_ICON.to_string(),
        }
    }
}

impl Config {
    /// Loads the application configuration.
    ///
    /// Later sources override earlier ones: defaults, the TOML file,
    /// `ALERTRELAY_*` variables, `SLACK_WEBHOOK_URL`, then the CLI.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            // e.g. ALERTRELAY_LOG_LEVEL=debug, ALERTRELAY_WEBHOOK__URL=https://...
            .merge(Env::prefixed("ALERTRELAY_").split("__"))
            .merge(
                Env::raw()
                    .only(&[LEGACY_WEBHOOK_ENV])
                    .map(|_| "webhook.url".into()),
            )
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }
}

// Provide a default implementation for tests and easy setup.
impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            webhook: WebhookConfig::default(),
        }
    }
}
