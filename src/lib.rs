//! # hierlog
//!
//! A hierarchical, thread-safe Rust logging facade with named logger
//! inheritance and pluggable sinks.
//!
//! ## Features
//!
//! - **Hierarchical Loggers**: Dotted names form a namespace tree; levels
//!   and sinks are inherited from the nearest configured ancestor
//! - **Any Creation Order**: Descendants can be created before their
//!   ancestors and are re-linked live when ancestors appear
//! - **Thread Safe**: Concurrent lookups and dispatch with a cheap
//!   fast path for already-registered names
//! - **Fault Isolated**: A failing or panicking sink never breaks a
//!   logging call
//!
//! ## Quick start
//!
//! ```
//! use hierlog::{Hierarchy, Level};
//!
//! let hierarchy = Hierarchy::new();
//! let root = hierarchy.root();
//! root.set_level(Some(Level::Info));
//!
//! let logger = hierarchy.get_logger("net.server");
//! logger.info("accepting connections");
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;
    pub use crate::sinks::FileSink;
    pub use crate::core::{
        default_hierarchy, get_logger, Hierarchy, Level, LogEvent, Logger, LoggerError, Result,
        Sink, SinkErrorHandler, TimestampFormat, WarningHandler,
    };
}

#[cfg(feature = "console")]
pub use crate::sinks::ConsoleSink;
pub use crate::core::{
    default_hierarchy, get_logger, Hierarchy, Level, LogEvent, Logger, LoggerError, Result, Sink,
    SinkErrorHandler, TimestampFormat, WarningHandler,
};
pub use crate::sinks::FileSink;
