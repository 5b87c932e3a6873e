//! Range Query utility
//!
//! Correlates an external byte-offset interval (for example from a
//! separate index) back to a tree node. Not used by the builder itself.

use crate::tree::node::TreeNode;

/// True iff the node's recorded span fully contains `[open, close]`.
#[inline]
pub fn is_in_range(node: &TreeNode, open: usize, close: usize) -> bool {
    node.position.contains(open, close)
}
