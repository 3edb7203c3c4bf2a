//! File sink implementation

use crate::core::{LogEvent, LoggerError, Result, Sink, TimestampFormat};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Appends events to a file through a buffered writer.
///
/// Sinks are shared between loggers as `Arc`s, so the writer sits behind a
/// mutex. Closing drops the writer after a final flush; `close` is
/// idempotent and a closed sink reports `SinkClosed` on further deliveries.
pub struct FileSink {
    writer: Mutex<Option<BufWriter<File>>>,
    name: String,
    timestamp_format: TimestampFormat,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            writer: Mutex::new(Some(BufWriter::new(file))),
            name: "file".to_string(),
            timestamp_format: TimestampFormat::default(),
        })
    }

    /// Name this sink instance. Sink names must be unique per logger, so
    /// give each file sink its own name when attaching several.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the timestamp format for this sink
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Sink for FileSink {
    fn deliver(&self, event: &LogEvent) -> Result<()> {
        let mut guard = self.writer.lock();
        let writer = guard
            .as_mut()
            .ok_or_else(|| LoggerError::sink_closed(&self.name))?;

        let mut line = format!(
            "[{}] [{:5}] {} - {}",
            self.timestamp_format.format(&event.timestamp),
            event.level.to_str(),
            event.logger,
            event.message
        );
        if let Some(ref error) = event.error {
            line.push_str(&format!(" (error: {})", error));
        }
        writeln!(writer, "{}", line)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Some(writer) = self.writer.lock().as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    fn close(&self) {
        if let Some(mut writer) = self.writer.lock().take() {
            let _ = writer.flush();
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
