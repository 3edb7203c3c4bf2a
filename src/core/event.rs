//! Log event structure
//!
//! A `LogEvent` is built exactly once per dispatched logging call, after the
//! threshold and effective-level gates have both passed, and is shared by
//! reference with every sink visited on the ancestor walk.

use super::level::Level;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread ID, computing and caching it on first access
fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(format!("{:?}", std::thread::current().id()));
        }
        cache
            .as_ref()
            .expect("thread_id cache initialized in previous line")
            .clone()
    })
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            *cache = Some(std::thread::current().name().map(String::from));
        }
        cache
            .as_ref()
            .expect("thread_name cache initialized in previous line")
            .clone()
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    pub level: Level,
    /// Name of the logger the event was emitted through
    pub logger: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub thread_id: String,
    pub thread_name: Option<String>,
    /// Rendered error chain, if the call attached one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LogEvent {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: Level, logger: impl Into<String>, message: String) -> Self {
        Self {
            level,
            logger: logger.into(),
            message: Self::sanitize_message(&message),
            timestamp: Utc::now(),
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
            error: None,
        }
    }

    /// Attach a rendered error chain to the event.
    ///
    /// The error and its sources are joined with `: ` so the whole chain
    /// lands on one log line.
    pub fn with_error(mut self, error: &(dyn std::error::Error + 'static)) -> Self {
        let mut rendered = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            rendered.push_str(": ");
            rendered.push_str(&cause.to_string());
            source = cause.source();
        }
        self.error = Some(Self::sanitize_message(&rendered));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_sanitizes_message() {
        let event = LogEvent::new(Level::Info, "a.b", "line1\nline2\tend\r".to_string());
        assert_eq!(event.message, "line1\\nline2\\tend\\r");
        assert!(!event.message.contains('\n'));
    }

    #[test]
    fn test_event_captures_logger_name() {
        let event = LogEvent::new(Level::Warn, "net.server", "boom".to_string());
        assert_eq!(event.logger, "net.server");
        assert_eq!(event.level, Level::Warn);
    }

    #[test]
    fn test_event_renders_error_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = crate::core::error::LoggerError::Io(io);

        let event = LogEvent::new(Level::Error, "fs", "write failed".to_string()).with_error(&err);
        let rendered = event.error.unwrap();
        assert!(rendered.contains("IO error"));
        assert!(rendered.contains("access denied"));
    }

    #[test]
    fn test_event_serializes_to_json() {
        let event = LogEvent::new(Level::Info, "a", "hello".to_string());
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"logger\":\"a\""));
        assert!(json.contains("\"Info\""));
        // No error attached, field is skipped entirely
        assert!(!json.contains("\"error\""));
    }
}
