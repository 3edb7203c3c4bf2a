//! Error types for the logging facade

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A sink returned an error while delivering an event
    #[error("Sink '{sink}' failed to deliver event: {message}")]
    SinkDelivery { sink: String, message: String },

    /// A sink panicked while delivering an event
    #[error("Sink '{sink}' panicked during delivery: {message}")]
    SinkPanicked { sink: String, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Sink closed or not writable
    #[error("Sink '{sink}' is closed")]
    SinkClosed { sink: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a sink delivery error
    pub fn sink_delivery(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkDelivery {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create a sink panic error
    pub fn sink_panicked(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::SinkPanicked {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a closed-sink error
    pub fn sink_closed(sink: impl Into<String>) -> Self {
        LoggerError::SinkClosed { sink: sink.into() }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::sink_delivery("file", "disk full");
        assert!(matches!(err, LoggerError::SinkDelivery { .. }));

        let err = LoggerError::config("Hierarchy", "bad threshold");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = LoggerError::sink_closed("console");
        assert!(matches!(err, LoggerError::SinkClosed { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::sink_delivery("file", "disk full");
        assert_eq!(
            err.to_string(),
            "Sink 'file' failed to deliver event: disk full"
        );

        let err = LoggerError::sink_panicked("net", "index out of bounds");
        assert_eq!(
            err.to_string(),
            "Sink 'net' panicked during delivery: index out of bounds"
        );

        let err = LoggerError::config("Hierarchy", "bad threshold");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for Hierarchy: bad threshold"
        );
    }
}
