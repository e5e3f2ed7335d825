//! A metrics recorder that keeps counters in memory and logs them on demand.

use metrics::{Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit};
use metrics_util::registry::{AtomicStorage, Registry};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

/// Records counters in an atomic registry. Clones share the same registry, so
/// one clone can be installed globally while another is kept for logging.
#[derive(Clone)]
pub struct LoggingRecorder {
    registry: Arc<Registry<Key, AtomicStorage>>,
}

impl LoggingRecorder {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry::new(AtomicStorage)),
        }
    }

    /// All registered counters as `(name{label=value,...}, value)`, sorted by key.
    pub fn snapshot(&self) -> Vec<(String, u64)> {
        let mut counters: Vec<(String, u64)> = self
            .registry
            .get_counter_handles()
            .into_iter()
            .map(|(key, counter)| (format_key(&key), counter.load(Ordering::Relaxed)))
            .collect();
        counters.sort();
        counters
    }

    /// Value of the counter rendered as `key`, or 0 if it was never touched.
    pub fn counter(&self, key: &str) -> u64 {
        self.snapshot()
            .into_iter()
            .find(|(k, _)| k == key)
            .map_or(0, |(_, value)| value)
    }

    /// Logs every counter at INFO level.
    pub fn log_snapshot(&self) {
        info!("--- Metrics Snapshot ---");
        for (key, value) in self.snapshot() {
            info!("[Counter] {}: {}", key, value);
        }
    }
}

impl Default for LoggingRecorder {
    fn default() -> Self {
        Self::new()
    }
}

fn format_key(key: &Key) -> String {
    let labels: Vec<String> = key
        .labels()
        .map(|label| format!("{}={}", label.key(), label.value()))
        .collect();
    if labels.is_empty() {
        key.name().to_string()
    } else {
        format!("{}{{{}}}", key.name(), labels.join(","))
    }
}

impl Recorder for LoggingRecorder {
    fn describe_counter(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn describe_gauge(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn describe_histogram(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn register_counter(&self, key: &Key, _metadata: &Metadata<'_>) -> Counter {
        self.registry.get_or_create_counter(key, |c| c.clone()).into()
    }

    fn register_gauge(&self, key: &Key, _metadata: &Metadata<'_>) -> Gauge {
        self.registry.get_or_create_gauge(key, |g| g.clone()).into()
    }

    fn register_histogram(&self, key: &Key, _metadata: &Metadata<'_>) -> Histogram {
        self.registry.get_or_create_histogram(key, |h| h.clone()).into()
    }
}
