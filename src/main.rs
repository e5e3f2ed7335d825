//! AlertRelay - Queue Alert Forwarder
//!
//! Reads one queue event, parses every record into an alert and forwards it
//! to Slack (or the console when no webhook is configured). Exits non-zero
//! if any record fails so the batch can be redelivered.

use alertrelay::{
    cli::Cli, config::Config, handler::handle_batch, internal_metrics::LoggingRecorder,
    notification, read_event,
};
use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        // Manually initialize logging for this specific error
        init_tracing("error");
        error!("Failed to load configuration: {}", err);
        std::process::exit(1);
    });

    init_tracing(&config.log_level);

    info!("AlertRelay starting up...");
    info!("-------------------- Configuration --------------------");
    info!("Log Level: {}", config.log_level);
    info!(
        "Slack Output: {}",
        if config.webhook.effective_url().is_some() {
            "Enabled"
        } else {
            "Disabled"
        }
    );
    info!("-------------------------------------------------------");

    let recorder = LoggingRecorder::new();
    if let Err(e) = metrics::set_global_recorder(recorder.clone()) {
        warn!("Failed to install metrics recorder: {}", e);
    }

    let notifier = notification::from_config(&config.webhook)?;
    let event = read_event(cli.event.as_deref()).await?;

    let result = handle_batch(&event.records, notifier.as_ref()).await;
    recorder.log_snapshot();

    match result {
        Ok(summary) => {
            info!("Batch complete: {} messages processed.", summary.processed);
            Ok(())
        }
        Err(e) => {
            error!(message_id = e.message_id(), "Batch failed: {}", e);
            Err(e.into())
        }
    }
}
