//! Traversal Engine
//!
//! Generic walks over a result tree. Both algorithms are iterative with
//! an explicit stack/queue of `(node, depth)` pairs, so traversal depth
//! is bounded only by memory, never by the call stack.
//!
//! Cancellation is a sentinel returned by the visitor (`VisitFlow::Stop`)
//! and checked by the loop after each visit. Stopping a walk is a normal
//! early return, never an observable error, and the signal cannot outlive
//! the visit that produced it.

use std::collections::VecDeque;

use crate::tree::node::TreeNode;

/// Visitor verdict after each node: keep walking or stop now.
///
/// `Stop` halts the walk permanently; no further nodes are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitFlow {
    Continue,
    Stop,
}

/// Depth-first, left-to-right, pre-order walk.
///
/// The visitor receives each node and its depth (root = 0). Children are
/// pushed in reverse order so the next pop always yields the leftmost
/// unvisited child - that ordering is what makes the walk pre-order.
pub fn dfs<F>(root: &TreeNode, mut visit: F)
where
    F: FnMut(&TreeNode, usize) -> VisitFlow,
{
    let mut stack: Vec<(&TreeNode, usize)> = vec![(root, 0)];

    while let Some((node, depth)) = stack.pop() {
        if visit(node, depth) == VisitFlow::Stop {
            return;
        }

        for child in node.children.iter().rev() {
            stack.push((child, depth + 1));
        }
    }
}

/// DFS with a companion leave callback.
///
/// `leave` fires once per node that had no children when it was pushed,
/// giving callers symmetric enter/exit bookkeeping at the leaves of the
/// walk. Same cancellation contract as [`dfs`].
pub fn dfs_with_leave<F, L>(root: &TreeNode, mut visit: F, mut leave: L)
where
    F: FnMut(&TreeNode, usize) -> VisitFlow,
    L: FnMut(&TreeNode),
{
    let mut stack: Vec<(&TreeNode, usize)> = vec![(root, 0)];

    while let Some((node, depth)) = stack.pop() {
        if visit(node, depth) == VisitFlow::Stop {
            return;
        }

        if node.children.is_empty() {
            leave(node);
            continue;
        }

        for child in node.children.iter().rev() {
            stack.push((child, depth + 1));
        }
    }
}

/// Breadth-first walk that invokes the visitor only at `level`
/// (root = 0).
///
/// Shallower levels are still traversed structurally to discover deeper
/// nodes; the walk never descends past the target level. Same
/// cancellation contract as [`dfs`].
pub fn bfs_to_level<F>(root: &TreeNode, level: usize, mut visit: F)
where
    F: FnMut(&TreeNode) -> VisitFlow,
{
    let mut queue: VecDeque<(&TreeNode, usize)> = VecDeque::new();
    queue.push_back((root, 0));

    while let Some((node, depth)) = queue.pop_front() {
        if depth == level {
            if visit(node) == VisitFlow::Stop {
                return;
            }
            // Nodes below the target level are never needed.
            continue;
        }

        for child in &node.children {
            queue.push_back((child, depth + 1));
        }
    }
}
