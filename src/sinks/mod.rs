//! Bundled sink implementations

#[cfg(feature = "console")]
pub mod console;
pub mod file;

#[cfg(feature = "console")]
pub use console::ConsoleSink;
pub use file::FileSink;

// Re-export the trait for convenience
pub use crate::core::Sink;
