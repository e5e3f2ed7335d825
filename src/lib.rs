//! AlertRelay - forwards queued alert messages to a notification channel
//!
//! This library parses alert messages delivered in queue batches, validates
//! them, and hands each one to a notifier (a Slack webhook or the console).
pub mod cli;
pub mod config;
pub mod consumer;
pub mod core;
pub mod formatting;
pub mod handler;
pub mod internal_metrics;
pub mod notification;

// Re-export core types for convenience
pub use crate::core::*;

use anyhow::{Context, Result};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Reads a queue event from `path`, or from stdin when `path` is `None` or `-`.
pub async fn read_event(path: Option<&Path>) -> Result<QueueEvent> {
    let raw = match path.filter(|p| *p != Path::new("-")) {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read event file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read event from stdin")?;
            buf
        }
    };

    serde_json::from_str(&raw).context("failed to decode queue event")
}
