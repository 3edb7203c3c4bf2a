//! Sink trait for log event destinations
//!
//! A sink is an opaque destination the dispatch walk hands finished events
//! to. Formatting and transport are the sink's own business; the hierarchy
//! only requires the contract below. Sinks are shared between nodes as
//! `Arc<dyn Sink>`, so implementations use interior mutability for any
//! writer state.

use super::{error::LoggerError, error::Result, event::LogEvent};
use std::sync::Arc;

pub trait Sink: Send + Sync {
    /// Deliver one event. May fail; failures are reported through the
    /// hierarchy's sink-error handler and never reach the logging caller.
    fn deliver(&self, event: &LogEvent) -> Result<()>;

    /// Flush any buffered output.
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Release resources. Must be idempotent; a closed sink may still
    /// receive `close` again.
    fn close(&self) {}

    /// Sink name, unique among the sinks attached to any single node.
    fn name(&self) -> &str;
}

/// Callback invoked when a sink fails or panics during delivery.
///
/// Delivery failures are isolated per sink per event: the ancestor walk
/// continues, and nothing propagates back into the logging call.
pub type SinkErrorHandler = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// Callback for internal diagnostics (no-sink warning, rejected
/// configuration input). Defaults to a stderr write.
pub type WarningHandler = Arc<dyn Fn(&str) + Send + Sync>;
