//! A mock notifier for testing the batch pipeline without a network.

use alertrelay::notification::DispatchError;
use alertrelay::{NormalizedAlert, Notifier};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, Default)]
pub struct MockNotifier {
    pub sent_alerts: Arc<Mutex<Vec<NormalizedAlert>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_sent_alerts(&self) -> Vec<NormalizedAlert> {
        self.sent_alerts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send_alert(&self, alert: &NormalizedAlert) -> Result<(), DispatchError> {
        self.sent_alerts.lock().unwrap().push(alert.clone());
        Ok(())
    }
}
