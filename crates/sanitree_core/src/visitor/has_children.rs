//! Reusable "wraps children" behavior.

use sanitree_ast::{NodeId, SafeNode};

use crate::Cursor;

/// Enter/leave logic shared by visitors of simple whitelisted elements.
///
/// On enter it appends one output element at the cursor position and moves
/// the cursor into it, so the children of the input node land inside the
/// element. On leave it moves the cursor back.
///
/// With `prune_empty`, an element that ends up without children is detached
/// from the output on leave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasChildren {
    tag: String,
    prune_empty: bool,
}

impl HasChildren {
    /// Creates the behavior for elements rendered as `<tag>`.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            prune_empty: false,
        }
    }

    /// Drops elements that end up with no children.
    pub fn prune_empty(mut self, prune_empty: bool) -> Self {
        self.prune_empty = prune_empty;
        self
    }

    /// Appends a bare `<tag>` element and enters it.
    pub fn enter(&self, cursor: &mut Cursor) -> NodeId {
        self.enter_with(cursor, SafeNode::element(self.tag.as_str()))
    }

    /// Appends a caller-built element and enters it.
    pub fn enter_with(&self, cursor: &mut Cursor, element: SafeNode) -> NodeId {
        let id = cursor.append(element);
        cursor.enter(id);
        id
    }

    /// Leaves the element entered by [`enter`](Self::enter), pruning it if
    /// configured to and empty.
    pub fn leave(&self, cursor: &mut Cursor) {
        let Some(left) = cursor.leave() else {
            return;
        };

        if self.prune_empty && cursor.tree().children(left).is_empty() {
            cursor.tree_mut().detach(left);
        }
    }
}
