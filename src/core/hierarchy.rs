//! Hierarchical logger registry and dispatch engine
//!
//! The hierarchy maintains the namespace tree of named loggers. Children
//! link to their parents but parents hold no pointers to children, and
//! loggers can be created in any order, descendant before ancestor.
//!
//! When a descendant is created before an ancestor, the ancestor's name is
//! entered into the registry as a pending entry recording the waiting
//! descendants. The moment a real logger is created at that name, the
//! waiting descendants are re-linked under it.

use super::error::LoggerError;
use super::event::LogEvent;
use super::level::Level;
use super::logger::Logger;
use super::node::{Node, NodeId, NO_PARENT, ROOT_ID};
use super::sink::{Sink, SinkErrorHandler, WarningHandler};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, OnceLock};

/// Registry entry for a dotted name.
///
/// `Pending` marks a name no logger has been created at yet, holding the
/// descendants waiting to be re-parented once one is. It is replaced by
/// `Registered` the moment the name is actually requested.
enum Entry {
    Registered(NodeId),
    Pending(Vec<NodeId>),
}

/// True if `name` is `ancestor` itself or lies below it in the namespace.
///
/// Prefix matching is keyed strictly on full dot-separated segments: `a` is
/// within `a` and `a.b` is within `a`, but `ab` is not. A raw string-prefix
/// check would conflate `ab` with `a`.
fn name_is_within(name: &str, ancestor: &str) -> bool {
    match name.strip_prefix(ancestor) {
        Some("") => true,
        Some(rest) => rest.starts_with('.'),
        None => false,
    }
}

struct HierarchyInner {
    /// All nodes ever created, addressed by stable index. Index 0 is the
    /// root. Nodes are never removed.
    arena: Vec<Arc<Node>>,
    by_name: HashMap<Arc<str>, Entry>,
}

struct HierarchyShared {
    inner: RwLock<HierarchyInner>,
    /// Hierarchy-wide cutoff, stored as the level ordinal. Events below it
    /// are dropped before any tree walk.
    threshold: AtomicU8,
    /// Sticky flag: the no-sink warning fires at most once per hierarchy.
    no_sink_warned: AtomicBool,
    warning_handler: RwLock<WarningHandler>,
    sink_error_handler: RwLock<SinkErrorHandler>,
}

/// The logger registry: owns the namespace tree and dispatches events.
///
/// `Hierarchy` is a cheap clone handle; clones share the same registry.
/// Loggers are obtained with [`Hierarchy::get_logger`] and stay valid for
/// the lifetime of the hierarchy.
///
/// # Example
///
/// ```
/// use hierlog::{Hierarchy, Level};
///
/// let hierarchy = Hierarchy::new();
/// let logger = hierarchy.get_logger("net.server");
///
/// logger.set_level(Some(Level::Warn));
/// logger.warn("listener stalled");
/// ```
#[derive(Clone)]
pub struct Hierarchy {
    shared: Arc<HierarchyShared>,
}

impl Hierarchy {
    /// Create a hierarchy whose root logger is set to `Debug` and whose
    /// threshold admits all levels.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root_level(Level::Debug)
    }

    /// Create a hierarchy with an explicit root level.
    ///
    /// The root always carries an explicit level; effective-level
    /// resolution terminates on it.
    #[must_use]
    pub fn with_root_level(level: Level) -> Self {
        let root = Arc::new(Node::new_root(level));
        Self {
            shared: Arc::new(HierarchyShared {
                inner: RwLock::new(HierarchyInner {
                    arena: vec![root],
                    by_name: HashMap::new(),
                }),
                threshold: AtomicU8::new(Level::All.as_u8()),
                no_sink_warned: AtomicBool::new(false),
                warning_handler: RwLock::new(Arc::new(|msg: &str| {
                    eprintln!("[hierlog WARNING] {}", msg);
                })),
                sink_error_handler: RwLock::new(Arc::new(|err: &LoggerError| {
                    eprintln!("[hierlog ERROR] {}", err);
                })),
            }),
        }
    }

    /// The root logger.
    pub fn root(&self) -> Logger {
        let node = self.shared.inner.read().arena[ROOT_ID].clone();
        Logger::new(self.clone(), node)
    }

    /// Return the logger registered under `name`, creating it if needed.
    ///
    /// Repeated calls with the same name return handles to the same node.
    /// A freshly created logger is linked with its existing ancestors as
    /// well as any descendants that were created before it.
    pub fn get_logger(&self, name: &str) -> Logger {
        // Fast path: the name is almost always already registered once the
        // process is warmed up.
        {
            let inner = self.shared.inner.read();
            if let Some(Entry::Registered(id)) = inner.by_name.get(name) {
                return Logger::new(self.clone(), inner.arena[*id].clone());
            }
        }

        let mut inner = self.shared.inner.write();
        // Re-check: another thread may have registered the name between the
        // read and write lock.
        if let Some(Entry::Registered(id)) = inner.by_name.get(name) {
            let node = inner.arena[*id].clone();
            return Logger::new(self.clone(), node);
        }
        let waiting = match inner.by_name.get_mut(name) {
            Some(Entry::Pending(waiting)) => Some(std::mem::take(waiting)),
            _ => None,
        };

        let name: Arc<str> = Arc::from(name);
        let id = inner.arena.len();
        let node = Arc::new(Node::new(name.clone(), id, None));
        inner.arena.push(node.clone());
        inner.by_name.insert(name, Entry::Registered(id));

        if let Some(waiting) = waiting {
            Self::update_children(&inner, waiting, id);
        }
        Self::update_parents(&mut inner, id);

        Logger::new(self.clone(), node)
    }

    /// Return the logger registered under `name`, or `None` if no logger
    /// has been created there. Pending entries do not count.
    pub fn exists(&self, name: &str) -> Option<Logger> {
        let inner = self.shared.inner.read();
        match inner.by_name.get(name) {
            Some(Entry::Registered(id)) => {
                Some(Logger::new(self.clone(), inner.arena[*id].clone()))
            }
            _ => None,
        }
    }

    /// All currently registered loggers. The root is not included.
    pub fn current_loggers(&self) -> Vec<Logger> {
        let inner = self.shared.inner.read();
        inner
            .by_name
            .values()
            .filter_map(|entry| match entry {
                Entry::Registered(id) => {
                    Some(Logger::new(self.clone(), inner.arena[*id].clone()))
                }
                Entry::Pending(_) => None,
            })
            .collect()
    }

    /// Link a freshly created node toward the root.
    ///
    /// Walks the node's potential ancestors, longest prefix first. Three
    /// cases per prefix:
    ///
    /// 1. No entry: a pending entry is created recording this node.
    /// 2. Registered: that node is the nearest existing ancestor. Link to
    ///    it and stop; updating the ancestor's own parent is the ancestor's
    ///    business.
    /// 3. Pending: this node joins the waiting list.
    ///
    /// With no registered ancestor at all, the node links to the root.
    fn update_parents(inner: &mut HierarchyInner, node_id: NodeId) {
        let node = inner.arena[node_id].clone();
        let name = node.name.clone();
        let mut parent_found = false;

        // For "w.x.y.z", visit "w.x.y", "w.x", "w", but not "w.x.y.z".
        let mut boundary = name.rfind('.');
        while let Some(idx) = boundary {
            let prefix = &name[..idx];
            match inner.by_name.get_mut(prefix) {
                None => {
                    inner
                        .by_name
                        .insert(Arc::from(prefix), Entry::Pending(vec![node_id]));
                }
                Some(Entry::Registered(parent_id)) => {
                    node.set_parent(*parent_id);
                    parent_found = true;
                    break;
                }
                Some(Entry::Pending(waiting)) => waiting.push(node_id),
            }
            boundary = name[..idx].rfind('.');
        }

        if !parent_found {
            node.set_parent(ROOT_ID);
        }
    }

    /// Re-link the descendants that were waiting for `new_id`'s name.
    ///
    /// A waiting child keeps its current parent when that parent already
    /// lies at or below the new name, meaning some closer ancestor was
    /// registered in the meantime. Otherwise the new node is spliced in:
    /// it inherits the child's old parent and becomes the child's parent.
    fn update_children(inner: &HierarchyInner, waiting: Vec<NodeId>, new_id: NodeId) {
        let new_node = &inner.arena[new_id];

        for child_id in waiting {
            let child = &inner.arena[child_id];
            let parent_id = child.parent_id();

            let keeps_closer_parent = parent_id != ROOT_ID
                && name_is_within(&inner.arena[parent_id].name, &new_node.name);
            if !keeps_closer_parent {
                new_node.set_parent(parent_id);
                child.set_parent(new_id);
            }
        }
    }

    /// Resolve the level actually enforced for `node`: its own explicit
    /// level if set, otherwise the nearest ancestor's.
    ///
    /// O(depth); executes on every logging call.
    pub(crate) fn effective_level(&self, node: &Node) -> Level {
        if let Some(level) = node.config.read().level {
            return level;
        }

        let inner = self.shared.inner.read();
        let mut id = node.parent_id();
        while id != NO_PARENT {
            let ancestor = &inner.arena[id];
            if let Some(level) = ancestor.config.read().level {
                return level;
            }
            id = ancestor.parent_id();
        }
        // The root always carries an explicit level; walking past it means
        // the registry itself is broken.
        unreachable!("level resolution walked past the root")
    }

    /// Hierarchy-wide cutoff: logging requests below `level` are dropped
    /// before any tree walk, regardless of per-logger levels.
    pub fn set_threshold(&self, level: Level) {
        self.shared.threshold.store(level.as_u8(), Ordering::Relaxed);
    }

    pub fn threshold(&self) -> Level {
        Level::from_u8(self.shared.threshold.load(Ordering::Relaxed))
    }

    /// True if the hierarchy is disabled for `level`. This is the cheapest
    /// gate on the logging path: one atomic load and a compare.
    #[inline]
    pub fn is_disabled(&self, level: Level) -> bool {
        self.shared.threshold.load(Ordering::Relaxed) > level.as_u8()
    }

    /// Walk from `node` toward the root delivering `event` to every
    /// attached sink, in attachment order, stopping after the first
    /// non-additive node.
    ///
    /// Each node's sink list is snapshotted under its node lock; no lock is
    /// held while a sink runs, so a slow sink cannot stall configuration.
    /// Delivery is sequential, preserving per-node output ordering. A sink
    /// failure or panic is reported through the sink-error handler and
    /// never interrupts the walk.
    pub(crate) fn call_sinks(&self, node: &Node, event: &LogEvent) {
        let mut sinks: Vec<Arc<dyn Sink>> = Vec::new();
        {
            let inner = self.shared.inner.read();
            let mut current: &Node = node;
            loop {
                let additive = {
                    let config = current.config.read();
                    sinks.extend(config.sinks.iter().cloned());
                    config.additive
                };
                if !additive {
                    break;
                }
                match current.parent_id() {
                    NO_PARENT => break,
                    id => current = &inner.arena[id],
                }
            }
        }

        for sink in &sinks {
            let delivered =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.deliver(event)));
            match delivered {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    self.report_sink_error(&LoggerError::sink_delivery(
                        sink.name(),
                        err.to_string(),
                    ));
                }
                Err(panic_info) => {
                    let message = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        (*s).to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "unknown panic".to_string()
                    };
                    self.report_sink_error(&LoggerError::sink_panicked(sink.name(), message));
                }
            }
        }

        if sinks.is_empty() {
            self.emit_no_sink_warning(&event.logger);
        }
    }

    /// Warn once per hierarchy that an event found no sinks anywhere on its
    /// ancestor walk. Sticky: later zero-delivery calls stay silent.
    fn emit_no_sink_warning(&self, logger_name: &str) {
        if !self.shared.no_sink_warned.swap(true, Ordering::Relaxed) {
            self.warn(&format!(
                "No sinks could be found for logger ({}). Please initialize the logging system properly.",
                logger_name
            ));
        }
    }

    pub(crate) fn warn(&self, message: &str) {
        let handler = self.shared.warning_handler.read().clone();
        handler(message);
    }

    pub(crate) fn report_sink_error(&self, error: &LoggerError) {
        let handler = self.shared.sink_error_handler.read().clone();
        handler(error);
    }

    /// Replace the diagnostic warning handler. The default writes to stderr.
    pub fn set_warning_handler(&self, handler: WarningHandler) {
        *self.shared.warning_handler.write() = handler;
    }

    /// Replace the sink failure handler. The default writes to stderr.
    pub fn set_sink_error_handler(&self, handler: SinkErrorHandler) {
        *self.shared.sink_error_handler.write() = handler;
    }

    /// Reset the hierarchy to its defaults: root level back to `Debug`,
    /// threshold back to `All`, every logger's explicit level cleared,
    /// additivity restored, and all sinks closed and detached.
    ///
    /// Existing loggers are not removed, only reset.
    pub fn reset(&self) {
        self.set_threshold(Level::All);

        let inner = self.shared.inner.read();
        for node in &inner.arena {
            let mut config = node.config.write();
            config.level = if node.is_root() {
                Some(Level::Debug)
            } else {
                None
            };
            config.additive = true;
            for sink in config.sinks.drain(..) {
                sink.close();
            }
        }
    }

    /// Close and detach every sink in the hierarchy, root included.
    ///
    /// Call before process exit so buffering sinks can flush pending
    /// events.
    pub fn shutdown(&self) {
        let inner = self.shared.inner.read();
        for node in &inner.arena {
            let mut config = node.config.write();
            for sink in config.sinks.drain(..) {
                sink.close();
            }
        }
    }

    pub(crate) fn node_by_id(&self, id: NodeId) -> Arc<Node> {
        self.shared.inner.read().arena[id].clone()
    }

    #[cfg(test)]
    pub(crate) fn no_sink_warning_emitted(&self) -> bool {
        self.shared.no_sink_warned.load(Ordering::Relaxed)
    }
}

impl Default for Hierarchy {
    fn default() -> Self {
        Self::new()
    }
}

static DEFAULT_HIERARCHY: OnceLock<Hierarchy> = OnceLock::new();

/// The process-wide hierarchy, created on first use with default settings.
///
/// Library code that wants an explicit lifecycle should construct its own
/// [`Hierarchy`] and pass it around; this accessor exists for call sites
/// where threading a registry handle through is not worth it.
pub fn default_hierarchy() -> &'static Hierarchy {
    DEFAULT_HIERARCHY.get_or_init(Hierarchy::new)
}

/// Shorthand for `default_hierarchy().get_logger(name)`.
pub fn get_logger(name: &str) -> Logger {
    default_hierarchy().get_logger(name)
}
