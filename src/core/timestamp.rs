//! Timestamp formatting for the bundled sinks

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options for sink output.
///
/// # Example
///
/// ```
/// use hierlog::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// let rendered = format.format(&Utc::now());
/// // e.g. "2025-01-08T10:30:45.123Z"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// RFC 3339 with timezone offset: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// strftime-compatible custom format string
    Custom(String),
}

impl TimestampFormat {
    pub fn format(&self, timestamp: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => {
                timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
            }
            TimestampFormat::Rfc3339 => timestamp.to_rfc3339(),
            TimestampFormat::Unix => timestamp.timestamp().to_string(),
            TimestampFormat::UnixMillis => timestamp.timestamp_millis().to_string(),
            TimestampFormat::Custom(pattern) => timestamp.format(pattern).to_string(),
        }
    }
}
