//! Traversal cursor.
//!
//! The cursor is the single piece of mutable state shared by the engine and
//! every visitor during one traversal. It owns the output tree being built
//! and points at the "current output parent": the node new output nodes are
//! attached to.

use sanitree_ast::{NodeId, SafeNode, SafeTree};

/// Snapshot of the cursor position, compared by the engine to verify that
/// visitors restored the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Checkpoint {
    node: NodeId,
    depth: usize,
}

/// Mutable traversal context for one traversal call.
///
/// `enter` and `leave` form a stack: `leave` always returns the cursor to
/// the node that was current before the matching `enter`, whatever happened
/// to the tree in between.
///
/// # Example
///
/// ```rust
/// use sanitree_ast::SafeNode;
/// use sanitree_core::Cursor;
///
/// let mut cursor = Cursor::new();
/// let root = cursor.node();
///
/// let p = cursor.append(SafeNode::element("p"));
/// cursor.enter(p);
/// cursor.append(SafeNode::text("inside"));
/// assert_eq!(cursor.leave(), Some(p));
///
/// assert_eq!(cursor.node(), root);
/// assert_eq!(cursor.into_tree().texts(), vec!["inside"]);
/// ```
#[derive(Debug)]
pub struct Cursor {
    tree: SafeTree,
    node: NodeId,
    stack: Vec<NodeId>,
    pushes: usize,
    pops: usize,
}

impl Cursor {
    /// Creates a cursor over a fresh tree, positioned at its `Document` root.
    pub fn new() -> Self {
        let tree = SafeTree::new();
        let node = tree.root();
        Self {
            tree,
            node,
            stack: Vec::new(),
            pushes: 0,
            pops: 0,
        }
    }

    /// Returns the current output parent.
    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Returns the current output parent's node.
    #[inline]
    pub fn current(&self) -> &SafeNode {
        self.tree.get(self.node)
    }

    /// Returns how many `enter` calls are awaiting their `leave`.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns the number of `enter` calls made so far.
    #[inline]
    pub fn pushes(&self) -> usize {
        self.pushes
    }

    /// Returns the number of effective `leave` calls made so far.
    #[inline]
    pub fn pops(&self) -> usize {
        self.pops
    }

    #[inline]
    pub fn tree(&self) -> &SafeTree {
        &self.tree
    }

    #[inline]
    pub fn tree_mut(&mut self) -> &mut SafeTree {
        &mut self.tree
    }

    /// Appends `node` under the current output parent.
    pub fn append(&mut self, node: SafeNode) -> NodeId {
        self.tree.append_child(self.node, node)
    }

    /// Redirects the cursor into `id`.
    pub fn enter(&mut self, id: NodeId) {
        self.stack.push(self.node);
        self.node = id;
        self.pushes += 1;
    }

    /// Returns the cursor to the node that was current before the matching
    /// [`enter`](Self::enter) and returns the node it left.
    ///
    /// Returns `None` and stays put when there is nothing to leave.
    pub fn leave(&mut self) -> Option<NodeId> {
        let previous = self.stack.pop()?;
        let left = std::mem::replace(&mut self.node, previous);
        self.pops += 1;
        Some(left)
    }

    /// Consumes the cursor and hands the output tree over.
    pub fn into_tree(self) -> SafeTree {
        self.tree
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            node: self.node,
            depth: self.stack.len(),
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cursor_points_at_document() {
        let cursor = Cursor::new();

        assert_eq!(cursor.node(), cursor.tree().root());
        assert_eq!(cursor.current(), &SafeNode::Document);
        assert_eq!(cursor.depth(), 0);
    }

    #[test]
    fn test_append_attaches_to_current_node() {
        let mut cursor = Cursor::new();
        let div = cursor.append(SafeNode::element("div"));
        cursor.enter(div);
        let text = cursor.append(SafeNode::text("a"));

        assert_eq!(cursor.tree().parent(text), Some(div));
        assert_eq!(cursor.current().tag(), Some("div"));
    }

    #[test]
    fn test_nested_enter_leave_restores_in_stack_order() {
        let mut cursor = Cursor::new();
        let root = cursor.node();
        let outer = cursor.append(SafeNode::element("ruby"));
        cursor.enter(outer);
        let inner = cursor.append(SafeNode::element("rp"));
        cursor.enter(inner);

        assert_eq!(cursor.depth(), 2);
        assert_eq!(cursor.leave(), Some(inner));
        assert_eq!(cursor.node(), outer);
        assert_eq!(cursor.leave(), Some(outer));
        assert_eq!(cursor.node(), root);
        assert_eq!(cursor.pushes(), cursor.pops());
    }

    #[test]
    fn test_leave_at_root_is_noop() {
        let mut cursor = Cursor::new();
        let root = cursor.node();

        assert_eq!(cursor.leave(), None);
        assert_eq!(cursor.node(), root);
        assert_eq!(cursor.pops(), 0);
    }

    #[test]
    fn test_leave_restores_even_after_detach() {
        let mut cursor = Cursor::new();
        let root = cursor.node();
        let p = cursor.append(SafeNode::element("p"));
        cursor.enter(p);
        cursor.tree_mut().detach(p);

        assert_eq!(cursor.leave(), Some(p));
        assert_eq!(cursor.node(), root);
    }

    #[test]
    fn test_checkpoint_tracks_position() {
        let mut cursor = Cursor::new();
        let before = cursor.checkpoint();
        let p = cursor.append(SafeNode::element("p"));
        cursor.enter(p);

        assert_ne!(cursor.checkpoint(), before);
        cursor.leave();
        assert_eq!(cursor.checkpoint(), before);
    }
}
