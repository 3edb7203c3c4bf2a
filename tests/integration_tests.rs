//! Integration tests for the logging facade
//!
//! These tests verify:
//! - End-to-end delivery through file sinks
//! - Level inheritance and threshold gating against real output
//! - Live re-parenting changing delivery routes
//! - Log injection prevention
//! - Shutdown and reset behavior

use hierlog::{FileSink, Hierarchy, Level, LoggerError, Sink};
use parking_lot::Mutex;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_file_sink_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let hierarchy = Hierarchy::new();
    let sink = Arc::new(FileSink::new(&log_file).expect("Failed to create sink"));
    hierarchy.root().attach_sink(sink.clone());

    let logger = hierarchy.get_logger("net.server");
    logger.info("accepting connections");
    logger.warn("slow client");

    sink.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("[INFO ]"));
    assert!(lines[0].contains("net.server - accepting connections"));
    assert!(lines[1].contains("[WARN ]"));
}

#[test]
fn test_log_injection_prevention() {
    // Newlines must be escaped so attackers cannot forge log entries
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("injection_test.log");

    let hierarchy = Hierarchy::new();
    let sink = Arc::new(FileSink::new(&log_file).expect("Failed to create sink"));
    hierarchy.root().attach_sink(sink.clone());

    let malicious = "User login\nERROR [2024-10-17] Fake error injected\nINFO Continuation";
    hierarchy.get_logger("auth").info(malicious);

    sink.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(content.contains("\\n"));

    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 1, "Log should be a single line, not multiple");
}

#[test]
fn test_additivity_routes_to_separate_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let parent_file = temp_dir.path().join("parent.log");
    let child_file = temp_dir.path().join("child.log");

    let hierarchy = Hierarchy::new();
    let parent_sink = Arc::new(
        FileSink::new(&parent_file)
            .expect("Failed to create sink")
            .with_name("parent"),
    );
    let child_sink = Arc::new(
        FileSink::new(&child_file)
            .expect("Failed to create sink")
            .with_name("child"),
    );

    let svc = hierarchy.get_logger("svc");
    svc.attach_sink(parent_sink.clone());
    let db = hierarchy.get_logger("svc.db");
    db.attach_sink(child_sink.clone());

    // Additive: both files receive the event
    db.info("query ran");
    // Non-additive: only the child file receives the event
    db.set_additivity(false);
    db.info("contained");

    parent_sink.flush().expect("Failed to flush");
    child_sink.flush().expect("Failed to flush");

    let parent_content = fs::read_to_string(&parent_file).expect("Failed to read");
    let child_content = fs::read_to_string(&child_file).expect("Failed to read");

    assert!(parent_content.contains("query ran"));
    assert!(!parent_content.contains("contained"));
    assert!(child_content.contains("query ran"));
    assert!(child_content.contains("contained"));
}

#[test]
fn test_threshold_overrides_explicit_levels() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("threshold.log");

    let hierarchy = Hierarchy::new();
    let sink = Arc::new(FileSink::new(&log_file).expect("Failed to create sink"));
    hierarchy.root().attach_sink(sink.clone());

    let logger = hierarchy.get_logger("chatty");
    logger.set_level(Some(Level::Debug));

    hierarchy.set_threshold(Level::Error);
    logger.debug("gated despite the explicit Debug level");
    logger.error("passes the gate");

    sink.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(!content.contains("gated despite"));
    assert!(content.contains("passes the gate"));
}

#[test]
fn test_reparenting_changes_delivery_route() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mid_file = temp_dir.path().join("mid.log");

    let hierarchy = Hierarchy::new();
    let deep = hierarchy.get_logger("a.b.c");

    // "a.b" does not exist yet; deep hangs off the root.
    deep.info("before relink");

    let mid = hierarchy.get_logger("a.b");
    let mid_sink = Arc::new(FileSink::new(&mid_file).expect("Failed to create sink"));
    mid.attach_sink(mid_sink.clone());
    mid.set_additivity(false);

    deep.info("after relink");

    mid_sink.flush().expect("Failed to flush");
    let content = fs::read_to_string(&mid_file).expect("Failed to read log file");
    assert!(!content.contains("before relink"));
    assert!(content.contains("after relink"));
}

#[test]
fn test_effective_level_inheritance_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("inherit.log");

    let hierarchy = Hierarchy::new();
    let sink = Arc::new(FileSink::new(&log_file).expect("Failed to create sink"));
    hierarchy.root().attach_sink(sink.clone());

    let svc = hierarchy.get_logger("svc");
    svc.set_level(Some(Level::Warn));

    // Created later, never configured: inherits Warn through the gap.
    let worker = hierarchy.get_logger("svc.pool.worker");
    assert_eq!(worker.effective_level(), Level::Warn);

    worker.info("suppressed by inherited level");
    worker.warn("emitted");

    sink.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(!content.contains("suppressed"));
    assert!(content.contains("emitted"));
}

#[test]
fn test_shutdown_closes_and_detaches_sinks() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("shutdown.log");

    let hierarchy = Hierarchy::new();
    let sink = Arc::new(FileSink::new(&log_file).expect("Failed to create sink"));
    hierarchy.root().attach_sink(sink.clone());

    hierarchy.get_logger("a").info("flushed on shutdown");
    hierarchy.shutdown();

    // The buffered line must have reached the file without an explicit flush.
    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(content.contains("flushed on shutdown"));
    assert!(hierarchy.root().sink_names().is_empty());

    // Closed sink rejects further deliveries but close stays idempotent.
    sink.close();
    let event = hierlog::LogEvent::new(Level::Info, "a", "late".to_string());
    assert!(matches!(
        sink.deliver(&event),
        Err(LoggerError::SinkClosed { .. })
    ));
}

#[test]
fn test_reset_silences_previous_configuration() {
    let hierarchy = Hierarchy::new();
    let delivered = Arc::new(Mutex::new(Vec::new()));

    struct CollectingSink {
        delivered: Arc<Mutex<Vec<String>>>,
    }
    impl hierlog::Sink for CollectingSink {
        fn deliver(&self, event: &hierlog::LogEvent) -> hierlog::Result<()> {
            self.delivered.lock().push(event.message.clone());
            Ok(())
        }
        fn name(&self) -> &str {
            "collecting"
        }
    }

    let logger = hierarchy.get_logger("a");
    logger.attach_sink(Arc::new(CollectingSink {
        delivered: delivered.clone(),
    }));
    logger.set_level(Some(Level::Fatal));

    hierarchy.reset();

    // Sinks are gone and the explicit level is cleared.
    assert!(logger.sink_names().is_empty());
    assert_eq!(logger.level(), None);
    logger.info("nobody is listening");
    assert!(delivered.lock().is_empty());
}

#[test]
fn test_default_hierarchy_is_shared() {
    let first = hierlog::get_logger("integration.shared");
    let second = hierlog::get_logger("integration.shared");
    assert!(first.ptr_eq(&second));

    let via_handle = hierlog::default_hierarchy().get_logger("integration.shared");
    assert!(first.ptr_eq(&via_handle));
}

#[test]
fn test_logging_never_panics_on_sink_failure() {
    let hierarchy = Hierarchy::new();
    let errors = Arc::new(Mutex::new(Vec::new()));
    let handler_errors = errors.clone();
    hierarchy.set_sink_error_handler(Arc::new(move |err: &LoggerError| {
        handler_errors.lock().push(err.to_string());
    }));

    struct BrokenSink;
    impl hierlog::Sink for BrokenSink {
        fn deliver(&self, _event: &hierlog::LogEvent) -> hierlog::Result<()> {
            Err(LoggerError::other("wire cut"))
        }
        fn name(&self) -> &str {
            "broken"
        }
    }

    hierarchy.root().attach_sink(Arc::new(BrokenSink));
    let logger = hierarchy.get_logger("a");

    // Must return normally despite the failing sink.
    logger.error("delivery fails quietly");

    let recorded = errors.lock();
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].contains("wire cut"));
}
