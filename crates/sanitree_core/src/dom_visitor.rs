//! The traversal engine.

use std::collections::HashSet;
use std::sync::OnceLock;
use std::time::Instant;

use sanitree_ast::{DomKind, DomNode, SafeNode, SafeTree};
use tracing::{debug, trace, warn};

use crate::cursor::Checkpoint;
use crate::visitor::{ElementVisitor, NodeVisitor, VoidElementVisitor};
use crate::{Cursor, SanitizeError, SanitizerConfig, TraversalLimits};

/// Pending work of a traversal, processed last-in first-out.
enum Frame<'n, 'a> {
    /// Dispatch enter hooks for an element at the given nesting depth.
    Enter(&'n DomNode<'a>, usize),
    /// Copy a text child verbatim.
    Text(&'a str),
    /// Dispatch leave hooks and verify the cursor is back at the checkpoint.
    Leave(&'n DomNode<'a>, Checkpoint),
}

/// Builds a sanitized [`SafeTree`] from an input tree by applying an ordered
/// list of [`NodeVisitor`]s.
///
/// For each element, every supporting visitor gets `enter_node` in
/// registration order, then the children are processed in document order,
/// then every visitor that still supports the element gets `leave_node` in
/// reverse registration order. Text children are copied under the cursor's
/// current node without dispatch and comments are always dropped. An element
/// no visitor accepts leaves no trace in the output, but its children are
/// still processed and attach to the nearest accepted ancestor.
///
/// The traversal runs on an explicit work stack, so input depth is bounded
/// by [`TraversalLimits`] rather than by the native stack.
///
/// # Example
///
/// ```rust
/// use sanitree_ast::DomArena;
/// use sanitree_core::DomVisitor;
/// use sanitree_core::visitor::ElementVisitor;
///
/// let arena = DomArena::new();
/// let input = arena.element("body", &[
///     arena.text("hi"),
///     arena.element("rp", &[arena.text("x")]),
///     arena.comment("c"),
/// ]);
///
/// let engine = DomVisitor::new(vec![Box::new(ElementVisitor::new("rp"))]);
/// let output = engine.visit(&input).unwrap();
///
/// assert_eq!(output.to_string(), "Document\n  Text(\"hi\")\n  Element(rp)\n    Text(\"x\")\n");
/// ```
pub struct DomVisitor {
    visitors: Vec<Box<dyn NodeVisitor>>,
    reversed: OnceLock<Box<[usize]>>,
    limits: TraversalLimits,
}

impl DomVisitor {
    /// Creates an engine with the given visitors and default limits.
    pub fn new(visitors: Vec<Box<dyn NodeVisitor>>) -> Self {
        Self {
            visitors,
            reversed: OnceLock::new(),
            limits: TraversalLimits::default(),
        }
    }

    /// Replaces the traversal limits.
    pub fn with_limits(mut self, limits: TraversalLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Builds an engine from a configuration.
    ///
    /// Visitors are registered extension by extension in the listed order,
    /// followed by the configured `elements`. An element listed more than
    /// once is registered once, at its first position.
    pub fn from_config(config: &SanitizerConfig) -> Result<Self, SanitizeError> {
        config.validate()?;

        let prune: HashSet<String> = config
            .prune_empty
            .iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        let mut registered = HashSet::new();
        let mut visitors: Vec<Box<dyn NodeVisitor>> = Vec::new();

        for extension in &config.extensions {
            for name in extension.elements() {
                if registered.insert(name.to_string()) {
                    visitors.push(Box::new(
                        ElementVisitor::new(name).with_prune_empty(prune.contains(*name)),
                    ));
                }
            }
            for name in extension.void_elements() {
                if registered.insert(name.to_string()) {
                    visitors.push(Box::new(VoidElementVisitor::new(name)));
                }
            }
        }

        for name in &config.elements {
            let name = name.to_ascii_lowercase();
            if registered.insert(name.clone()) {
                let prune_empty = prune.contains(&name);
                visitors.push(Box::new(
                    ElementVisitor::new(&name).with_prune_empty(prune_empty),
                ));
            }
        }

        debug!(
            "Registered {} visitors from {} extensions",
            visitors.len(),
            config.extensions.len()
        );

        Ok(Self::new(visitors).with_limits(config.limits))
    }

    #[inline]
    pub fn limits(&self) -> &TraversalLimits {
        &self.limits
    }

    /// Returns the number of registered visitors.
    #[inline]
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    /// Returns the visitors' names in registration order.
    pub fn visitor_names(&self) -> Vec<&str> {
        self.visitors.iter().map(|visitor| visitor.name()).collect()
    }

    /// Visitor indices in reverse registration order, derived on first use.
    fn reversed(&self) -> &[usize] {
        self.reversed.get_or_init(|| (0..self.visitors.len()).rev().collect())
    }

    /// Sanitizes the tree rooted at `root`.
    ///
    /// The root itself is dispatched like any other element. Returns the
    /// output tree, owned by the caller, or an error if a limit was exceeded
    /// or a visitor failed to restore the cursor.
    pub fn visit(&self, root: &DomNode<'_>) -> Result<SafeTree, SanitizeError> {
        let started = Instant::now();
        let reversed = self.reversed();
        let mut cursor = Cursor::new();
        let mut stack = vec![Frame::Enter(root, 0)];
        let mut visited = 0usize;
        let mut excluded = 0usize;

        debug!("Visiting document with {} visitors", self.visitors.len());

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(node, depth) => {
                    self.check_depth(depth)?;
                    visited += 1;
                    self.check_size(visited)?;

                    let checkpoint = cursor.checkpoint();
                    let mut accepted = false;
                    for visitor in &self.visitors {
                        if visitor.supports(node, &cursor) {
                            visitor.enter_node(node, &mut cursor);
                            accepted = true;
                        }
                    }

                    if !accepted && node.is_element() {
                        excluded += 1;
                        trace!("Excluded <{}>: no visitor supports it", node.name);
                    }

                    stack.push(Frame::Leave(node, checkpoint));
                    for child in node.children.iter().rev() {
                        match child.kind {
                            DomKind::Element => stack.push(Frame::Enter(child, depth + 1)),
                            DomKind::Text => {
                                stack.push(Frame::Text(child.value.unwrap_or_default()))
                            }
                            DomKind::Comment => {}
                        }
                    }
                }
                Frame::Text(content) => {
                    visited += 1;
                    self.check_size(visited)?;
                    cursor.append(SafeNode::text(content));
                }
                Frame::Leave(node, checkpoint) => {
                    for &index in reversed {
                        let visitor = &self.visitors[index];
                        if visitor.supports(node, &cursor) {
                            visitor.leave_node(node, &mut cursor);
                        }
                    }

                    if cursor.checkpoint() != checkpoint {
                        warn!("Visitors did not restore the cursor after <{}>", node.name);
                        return Err(SanitizeError::unbalanced(node.name));
                    }
                }
            }
        }

        debug!(
            "Visited {} nodes ({} elements excluded) in {:?}",
            visited,
            excluded,
            started.elapsed()
        );

        Ok(cursor.into_tree())
    }

    fn check_depth(&self, depth: usize) -> Result<(), SanitizeError> {
        if self.limits.allows_depth(depth) {
            return Ok(());
        }
        let max = self.limits.max_depth.unwrap_or_default();
        warn!("Aborting traversal: nesting depth exceeds {}", max);
        Err(SanitizeError::DepthExceeded { max })
    }

    fn check_size(&self, count: usize) -> Result<(), SanitizeError> {
        if self.limits.allows_nodes(count) {
            return Ok(());
        }
        let max = self.limits.max_nodes.unwrap_or_default();
        warn!("Aborting traversal: document exceeds {} nodes", max);
        Err(SanitizeError::SizeExceeded { max })
    }
}

impl Default for DomVisitor {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl std::fmt::Debug for DomVisitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomVisitor")
            .field("visitors", &self.visitor_names())
            .field("limits", &self.limits)
            .finish()
    }
}
