//! Processes one batch of queue records: parse, then notify, in order.
//!
//! The first failure aborts the batch. The caller is expected to hand the
//! whole batch back to the queue for redelivery.

use crate::consumer::{parse_record, ParseError};
use crate::core::{Notifier, RawRecord};
use crate::notification::DispatchError;
use thiserror::Error;
use tracing::{error, info, instrument};

/// Outcome of a batch in which every record was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
}

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("failed to parse message {message_id}: {source}")]
    Parse {
        message_id: String,
        #[source]
        source: ParseError,
    },

    #[error("failed to send alert for message {message_id}: {source}")]
    Dispatch {
        message_id: String,
        #[source]
        source: DispatchError,
    },
}

impl BatchError {
    /// Identifier of the record that stopped the batch.
    pub fn message_id(&self) -> &str {
        match self {
            Self::Parse { message_id, .. } | Self::Dispatch { message_id, .. } => message_id,
        }
    }
}

/// Handles a batch of records sequentially, stopping at the first failure.
#[instrument(skip_all, fields(notifier = notifier.name(), count = records.len()))]
pub async fn handle_batch(
    records: &[RawRecord],
    notifier: &dyn Notifier,
) -> Result<BatchSummary, BatchError> {
    let total = records.len();
    info!("Received {} queue messages", total);

    for (i, record) in records.iter().enumerate() {
        info!(
            "Processing message {}/{}: MessageID={}",
            i + 1,
            total,
            record.message_id
        );
        metrics::counter!("alerts_received").increment(1);

        let alert = parse_record(record).map_err(|source| {
            error!(message_id = %record.message_id, error = %source, "Failed to parse message");
            metrics::counter!("alerts_failed", "stage" => "parse").increment(1);
            BatchError::Parse {
                message_id: record.message_id.clone(),
                source,
            }
        })?;

        info!(
            level = alert.level(),
            service = alert.service(),
            "Parsed alert: {}",
            alert.message()
        );

        notifier.send_alert(&alert).await.map_err(|source| {
            error!(message_id = %record.message_id, error = %source, "Failed to send alert");
            metrics::counter!("alerts_failed", "stage" => "dispatch").increment(1);
            BatchError::Dispatch {
                message_id: record.message_id.clone(),
                source,
            }
        })?;

        metrics::counter!("alerts_dispatched").increment(1);
        info!("Successfully processed message {}", record.message_id);
    }

    Ok(BatchSummary { processed: total })
}
