//! In-process metrics collection.
//!
//! Counters emitted with the `metrics` macros are kept by a
//! [`LoggingRecorder`] and written to the log when a batch finishes.
pub mod logging_recorder;

pub use logging_recorder::LoggingRecorder;
