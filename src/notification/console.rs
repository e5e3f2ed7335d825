//! A notifier that prints alerts to the console.
//!
//! Used when no webhook is configured, and handy for local debugging.

use crate::core::{NormalizedAlert, Notifier};
use crate::formatting::format_console;
use crate::notification::DispatchError;
use async_trait::async_trait;
use std::io::Write;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, instrument, warn};

/// Writes a human-readable block per alert. Never fails.
pub struct ConsoleNotifier {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleNotifier {
    /// Creates a notifier that writes to stderr.
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stderr()))
    }

    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    fn name(&self) -> &str {
        "console"
    }

    #[instrument(skip(self, alert), fields(message_id = %alert.id()))]
    async fn send_alert(&self, alert: &NormalizedAlert) -> Result<(), DispatchError> {
        let rendered = format_console(alert);
        // A failed write is logged but never fails the alert.
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        match writeln!(writer, "{}", rendered).and_then(|_| writer.flush()) {
            Ok(()) => debug!("Alert written to console."),
            Err(e) => warn!(error = %e, "Failed to write alert to console"),
        }
        Ok(())
    }
}
