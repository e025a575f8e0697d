//! Visitors for whitelisted elements.

use sanitree_ast::{DomNode, SafeNode};

use super::{HasChildren, NodeVisitor};
use crate::Cursor;

/// Accepts one element name and keeps its children inside it.
///
/// Matching is ASCII case-insensitive; the output tag is lowercase.
/// Attributes of the input element are not copied.
///
/// # Example
///
/// ```rust
/// use sanitree_ast::DomArena;
/// use sanitree_core::visitor::{ElementVisitor, NodeVisitor};
/// use sanitree_core::Cursor;
///
/// let arena = DomArena::new();
/// let rp = arena.element("RP", &[]);
///
/// let visitor = ElementVisitor::new("rp");
/// assert!(visitor.supports(&rp, &Cursor::new()));
/// ```
#[derive(Debug, Clone)]
pub struct ElementVisitor {
    name: String,
    wrap: HasChildren,
}

impl ElementVisitor {
    pub fn new(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        Self {
            wrap: HasChildren::new(name.clone()),
            name,
        }
    }

    /// Drops the element when none of its children were kept.
    pub fn with_prune_empty(mut self, prune_empty: bool) -> Self {
        self.wrap = self.wrap.prune_empty(prune_empty);
        self
    }
}

impl NodeVisitor for ElementVisitor {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, node: &DomNode<'_>, _cursor: &Cursor) -> bool {
        node.is_element_named(&self.name)
    }

    fn enter_node(&self, _node: &DomNode<'_>, cursor: &mut Cursor) {
        self.wrap.enter(cursor);
    }

    fn leave_node(&self, _node: &DomNode<'_>, cursor: &mut Cursor) {
        self.wrap.leave(cursor);
    }
}

/// Accepts an element that has no content model, such as `<br>`.
///
/// The element is appended without moving the cursor, so any children the
/// input carries are promoted to the enclosing output node.
#[derive(Debug, Clone)]
pub struct VoidElementVisitor {
    name: String,
}

impl VoidElementVisitor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
        }
    }
}

impl NodeVisitor for VoidElementVisitor {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, node: &DomNode<'_>, _cursor: &Cursor) -> bool {
        node.is_element_named(&self.name)
    }

    fn enter_node(&self, _node: &DomNode<'_>, cursor: &mut Cursor) {
        cursor.append(SafeNode::element(self.name.as_str()));
    }

    fn leave_node(&self, _node: &DomNode<'_>, _cursor: &mut Cursor) {}
}
