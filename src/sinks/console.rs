//! Console sink implementation

use crate::core::{Level, LogEvent, Result, Sink, TimestampFormat};
use colored::Colorize;

/// Writes events to the terminal, `Error` and `Fatal` to stderr and
/// everything else to stdout.
pub struct ConsoleSink {
    use_colors: bool,
    timestamp_format: TimestampFormat,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            timestamp_format: TimestampFormat::default(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Set the timestamp format for this sink
    ///
    /// # Example
    ///
    /// ```
    /// use hierlog::sinks::ConsoleSink;
    /// use hierlog::TimestampFormat;
    ///
    /// let sink = ConsoleSink::new()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn format_line(&self, event: &LogEvent) -> String {
        let level_str = if self.use_colors {
            format!("{:5}", event.level.to_str())
                .color(event.level.color_code())
                .to_string()
        } else {
            format!("{:5}", event.level.to_str())
        };

        let mut line = format!(
            "[{}] [{}] {} - {}",
            self.timestamp_format.format(&event.timestamp),
            level_str,
            event.logger,
            event.message
        );
        if let Some(ref error) = event.error {
            line.push_str(&format!(" (error: {})", error));
        }
        line
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn deliver(&self, event: &LogEvent) -> Result<()> {
        let line = self.format_line(event);
        match event.level {
            Level::Error | Level::Fatal => eprintln!("{}", line),
            _ => println!("{}", line),
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        use std::io::Write;
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_plain() {
        let sink = ConsoleSink::with_colors(false);
        let event = LogEvent::new(Level::Info, "net.server", "started".to_string());
        let line = sink.format_line(&event);

        assert!(line.contains("[INFO ]"));
        assert!(line.contains("net.server - started"));
    }

    #[test]
    fn test_format_line_with_error() {
        let sink = ConsoleSink::with_colors(false);
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let event =
            LogEvent::new(Level::Error, "fs", "read failed".to_string()).with_error(&io);

        let line = sink.format_line(&event);
        assert!(line.contains("read failed (error: gone)"));
    }
}
