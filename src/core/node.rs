//! Arena node backing a named logger
//!
//! Nodes live in the hierarchy's arena and are addressed by stable index.
//! A node's parent is just another index into the same arena, so children
//! reference ancestors without ownership cycles. Parent indices are written
//! only while the hierarchy's structural write lock is held.

use super::level::Level;
use super::sink::Sink;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Stable index of a node in the hierarchy arena.
pub(crate) type NodeId = usize;

/// Arena index of the root node.
pub(crate) const ROOT_ID: NodeId = 0;

/// Parent marker for the root, which has no parent.
pub(crate) const NO_PARENT: NodeId = usize::MAX;

/// Mutable per-node state, guarded by the node lock.
///
/// The lock covers exactly these three fields. The dispatch walk holds it
/// only long enough to snapshot the sink list and additivity flag; it is
/// never held across a sink delivery.
pub(crate) struct NodeConfig {
    /// Explicitly assigned level; `None` means "inherit from the nearest
    /// ancestor". The root's level is always `Some`.
    pub(crate) level: Option<Level>,
    /// Whether events also propagate to ancestor sinks.
    pub(crate) additive: bool,
    /// Attached sinks, in attachment order. Delivery order follows.
    pub(crate) sinks: Vec<Arc<dyn Sink>>,
}

pub(crate) struct Node {
    pub(crate) name: Arc<str>,
    pub(crate) id: NodeId,
    parent: AtomicUsize,
    pub(crate) config: RwLock<NodeConfig>,
}

impl Node {
    pub(crate) fn new(name: Arc<str>, id: NodeId, level: Option<Level>) -> Self {
        Self {
            name,
            id,
            parent: AtomicUsize::new(ROOT_ID),
            config: RwLock::new(NodeConfig {
                level,
                additive: true,
                sinks: Vec::new(),
            }),
        }
    }

    pub(crate) fn new_root(level: Level) -> Self {
        let node = Self::new(Arc::from("root"), ROOT_ID, Some(level));
        node.parent.store(NO_PARENT, Ordering::Relaxed);
        node
    }

    /// Current parent index, or `NO_PARENT` for the root.
    ///
    /// Relaxed ordering is sufficient: writes happen only under the
    /// hierarchy's structural write lock, and every reader holds at least
    /// the structural read lock.
    #[inline]
    pub(crate) fn parent_id(&self) -> NodeId {
        self.parent.load(Ordering::Relaxed)
    }

    pub(crate) fn set_parent(&self, parent: NodeId) {
        self.parent.store(parent, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn is_root(&self) -> bool {
        self.id == ROOT_ID
    }
}
