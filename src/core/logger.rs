//! Named logger handle
//!
//! A `Logger` pairs a hierarchy with one node of its namespace tree. Handles
//! are cheap to clone and identity-stable: every lookup of the same name
//! yields a handle to the same node.

use super::event::LogEvent;
use super::hierarchy::Hierarchy;
use super::level::Level;
use super::node::{Node, NO_PARENT};
use super::sink::Sink;
use std::sync::Arc;

/// A named logger in a [`Hierarchy`].
///
/// Configuration (level, additivity, sinks) lives on the node and is shared
/// by all handles to it. Logging methods never return errors and never
/// panic on sink failure; sink problems are routed to the hierarchy's
/// sink-error handler.
///
/// # Example
///
/// ```
/// use hierlog::{Hierarchy, Level};
///
/// let hierarchy = Hierarchy::new();
/// let logger = hierarchy.get_logger("net.server");
/// logger.set_level(Some(Level::Info));
///
/// logger.info("listening on :8080");
/// logger.debug("not emitted, below the effective level");
/// ```
#[derive(Clone)]
pub struct Logger {
    hierarchy: Hierarchy,
    node: Arc<Node>,
}

impl Logger {
    pub(crate) fn new(hierarchy: Hierarchy, node: Arc<Node>) -> Self {
        Self { hierarchy, node }
    }

    /// The logger's dotted name. The root is named `root`.
    pub fn name(&self) -> &str {
        &self.node.name
    }

    /// The hierarchy this logger belongs to.
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// True if both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// The nearest registered ancestor, or `None` for the root.
    ///
    /// Pending names are never visible as parents: the parent chain only
    /// ever contains registered loggers and terminates at the root.
    pub fn parent(&self) -> Option<Logger> {
        match self.node.parent_id() {
            NO_PARENT => None,
            id => Some(Logger::new(
                self.hierarchy.clone(),
                self.hierarchy.node_by_id(id),
            )),
        }
    }

    /// The explicitly assigned level, if any. `None` means the level is
    /// inherited; see [`Logger::effective_level`].
    pub fn level(&self) -> Option<Level> {
        self.node.config.read().level
    }

    /// Assign or clear this logger's level.
    ///
    /// Clearing the root's level is ignored with a diagnostic: level
    /// resolution terminates on the root, so it must always carry one.
    pub fn set_level(&self, level: Option<Level>) {
        if self.node.is_root() && level.is_none() {
            self.hierarchy
                .warn("Ignoring attempt to clear the root logger's level.");
            return;
        }
        self.node.config.write().level = level;
    }

    /// The level actually enforced for this logger: its own if set,
    /// otherwise the nearest ancestor's.
    pub fn effective_level(&self) -> Level {
        self.hierarchy.effective_level(&self.node)
    }

    /// Whether events emitted here also propagate to ancestor sinks.
    pub fn additivity(&self) -> bool {
        self.node.config.read().additive
    }

    pub fn set_additivity(&self, additive: bool) {
        self.node.config.write().additive = additive;
    }

    /// Attach a sink. Attaching is idempotent: the same instance, or a sink
    /// whose name is already attached here, is a no-op.
    pub fn attach_sink(&self, sink: Arc<dyn Sink>) {
        let mut config = self.node.config.write();
        let already_attached = config.sinks.iter().any(|existing| {
            Arc::as_ptr(existing) as *const () == Arc::as_ptr(&sink) as *const ()
                || existing.name() == sink.name()
        });
        if !already_attached {
            config.sinks.push(sink);
        }
    }

    /// Detach and return the sink named `name`, if attached.
    pub fn detach_sink(&self, name: &str) -> Option<Arc<dyn Sink>> {
        let mut config = self.node.config.write();
        let position = config.sinks.iter().position(|s| s.name() == name)?;
        Some(config.sinks.remove(position))
    }

    /// Detach every sink from this logger. The sinks are not closed.
    pub fn detach_all_sinks(&self) {
        self.node.config.write().sinks.clear();
    }

    /// The attached sink named `name`, if any.
    pub fn sink(&self, name: &str) -> Option<Arc<dyn Sink>> {
        self.node
            .config
            .read()
            .sinks
            .iter()
            .find(|s| s.name() == name)
            .cloned()
    }

    /// Names of the attached sinks, in attachment order.
    pub fn sink_names(&self) -> Vec<String> {
        self.node
            .config
            .read()
            .sinks
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    /// Emit a message at `level`.
    ///
    /// Two gates run before anything is built: the hierarchy threshold
    /// (one atomic compare) and the effective-level check. Only when both
    /// pass is the event constructed, once, and walked up the tree.
    pub fn log(&self, level: Level, message: impl Into<String>) {
        if self.hierarchy.is_disabled(level) {
            return;
        }
        if !level.is_at_least(self.effective_level()) {
            return;
        }
        let event = LogEvent::new(level, &*self.node.name, message.into());
        self.hierarchy.call_sinks(&self.node, &event);
    }

    /// Emit a message at `level` with an attached error.
    ///
    /// The error's source chain is rendered into the event.
    pub fn log_with_error(
        &self,
        level: Level,
        message: impl Into<String>,
        error: &(dyn std::error::Error + 'static),
    ) {
        if self.hierarchy.is_disabled(level) {
            return;
        }
        if !level.is_at_least(self.effective_level()) {
            return;
        }
        let event = LogEvent::new(level, &*self.node.name, message.into()).with_error(error);
        self.hierarchy.call_sinks(&self.node, &event);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(Level::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(Level::Fatal, message);
    }

    /// True if a request at `level` would pass both gates.
    pub fn is_enabled_for(&self, level: Level) -> bool {
        !self.hierarchy.is_disabled(level) && level.is_at_least(self.effective_level())
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.is_enabled_for(Level::Debug)
    }

    pub fn is_info_enabled(&self) -> bool {
        self.is_enabled_for(Level::Info)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("level", &self.level())
            .field("additivity", &self.additivity())
            .finish()
    }
}
