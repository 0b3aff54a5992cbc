//! Recursion detection for indirect references.
//!
//! A reference is recursive when one of its ancestors is a reference to the
//! same object number. Only the current downward path matters: the same
//! object may appear any number of times in separate branches.

use crate::error::{Error, Result};
use crate::node::{NodeId, ObjectNode};

/// Ancestor walks over a node arena.
pub struct CycleGuard;

impl CycleGuard {
    /// Find the ancestor a new reference to `target` would cycle back to.
    ///
    /// `start` is the node the reference is about to be attached to; the walk
    /// checks it and then each of its ancestors up to the root.
    pub fn find_cycle(
        nodes: &[ObjectNode<'_>],
        start: Option<NodeId>,
        target: u32,
    ) -> Option<NodeId> {
        let mut current = start;
        // a well-formed chain is never longer than the arena
        for _ in 0..=nodes.len() {
            let id = current?;
            let node = nodes.get(id.index())?;
            if node.is_reference_node() && node.effective_number() == Some(target) {
                return Some(id);
            }
            current = node.parent();
        }
        None
    }

    /// The ancestor a recursive node points back to.
    ///
    /// Returns `Ok(None)` for nodes that are not recursive and for recursive
    /// nodes without a parent. A recursive node whose parent chain ends
    /// without a match is a broken tree and yields
    /// [`Error::BrokenParentChain`].
    pub fn ancestor(nodes: &[ObjectNode<'_>], id: NodeId) -> Result<Option<NodeId>> {
        let node = nodes.get(id.index()).ok_or(Error::UnknownNode(id))?;
        if !node.is_recursive() {
            return Ok(None);
        }
        let (parent, target) = match (node.parent(), node.effective_number()) {
            (Some(parent), Some(target)) => (parent, target),
            _ => return Ok(None),
        };
        match Self::find_cycle(nodes, Some(parent), target) {
            Some(ancestor) => Ok(Some(ancestor)),
            None => Err(Error::BrokenParentChain(id)),
        }
    }
}
