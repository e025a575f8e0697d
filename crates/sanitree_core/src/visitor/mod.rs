//! Node visitors: the per-element policies applied by the traversal engine.
//!
//! # Overview
//!
//! - [`NodeVisitor`] - The contract every policy implements
//! - [`HasChildren`] - Reusable "wraps children" behavior
//! - [`ElementVisitor`] - A whitelisted element whose children are kept
//! - [`VoidElementVisitor`] - A whitelisted element without content
//!
//! # Writing a visitor
//!
//! ```rust
//! use sanitree_ast::{DomNode, SafeNode};
//! use sanitree_core::visitor::{HasChildren, NodeVisitor};
//! use sanitree_core::Cursor;
//!
//! /// Keeps `<abbr>` together with its `title`.
//! struct AbbrVisitor {
//!     wrap: HasChildren,
//! }
//!
//! impl NodeVisitor for AbbrVisitor {
//!     fn supports(&self, node: &DomNode<'_>, _cursor: &Cursor) -> bool {
//!         node.is_element_named("abbr")
//!     }
//!
//!     fn enter_node(&self, node: &DomNode<'_>, cursor: &mut Cursor) {
//!         let mut element = SafeNode::element("abbr");
//!         if let Some(title) = node.attribute("title") {
//!             element = element.with_attribute("title", title);
//!         }
//!         self.wrap.enter_with(cursor, element);
//!     }
//!
//!     fn leave_node(&self, _node: &DomNode<'_>, cursor: &mut Cursor) {
//!         self.wrap.leave(cursor);
//!     }
//! }
//! ```

mod element;
mod has_children;

pub use element::{ElementVisitor, VoidElementVisitor};
pub use has_children::HasChildren;

use sanitree_ast::DomNode;

use crate::Cursor;

/// A policy deciding whether and how an input node contributes to the output.
///
/// For every input element the engine calls `enter_node` on each supporting
/// visitor in registration order, processes the children, then calls
/// `leave_node` on each visitor that still supports the node, in reverse
/// registration order.
///
/// `leave_node` must undo exactly what `enter_node` did to the cursor. None
/// of the methods may fail on malformed input: a visitor that does not want
/// a node simply does not support it.
pub trait NodeVisitor: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Returns true if this visitor handles `node`. Must not mutate anything.
    fn supports(&self, node: &DomNode<'_>, cursor: &Cursor) -> bool;

    /// Called before the children of `node` are processed.
    fn enter_node(&self, node: &DomNode<'_>, cursor: &mut Cursor);

    /// Called after the children of `node` were processed.
    fn leave_node(&self, node: &DomNode<'_>, cursor: &mut Cursor);
}
