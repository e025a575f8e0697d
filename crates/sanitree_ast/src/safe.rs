//! Output tree definition.
//!
//! The sanitized result is a [`SafeTree`]: an index arena of [`SafeNode`]s
//! rooted at a `Document` node. Each slot owns its ordered child list; the
//! parent link is bookkeeping for the traversal cursor only.

use std::fmt;

use serde::Serialize;

/// Deepest nesting below the `Document` root that [`SafeTree`] serializes.
///
/// Serialization recurses once per level, so deeper trees are rejected
/// before any output is produced.
pub const MAX_SERIALIZE_DEPTH: usize = 1024;

/// Handle to a node of a [`SafeTree`].
///
/// Ids are only meaningful for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Kind of an output node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SafeKind {
    Document,
    Element,
    Text,
}

/// A node of the sanitized output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafeNode {
    /// The root of every output tree.
    Document,
    /// An accepted element.
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    /// Text copied from the input.
    Text(String),
}

impl SafeNode {
    /// Creates an element without attributes.
    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element {
            tag: tag.into(),
            attributes: Vec::new(),
        }
    }

    /// Creates a text node.
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Adds an attribute to an element, replacing an existing value of the
    /// same name. Other kinds are returned unchanged.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Element { attributes, .. } = &mut self {
            let name = name.into();
            let value = value.into();
            match attributes.iter_mut().find(|(existing, _)| *existing == name) {
                Some(slot) => slot.1 = value,
                None => attributes.push((name, value)),
            }
        }
        self
    }

    #[inline]
    pub const fn kind(&self) -> SafeKind {
        match self {
            Self::Document => SafeKind::Document,
            Self::Element { .. } => SafeKind::Element,
            Self::Text(_) => SafeKind::Text,
        }
    }

    /// Returns the tag of an element.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Returns the content of a text node.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            Self::Text(content) => Some(content),
            _ => None,
        }
    }

    /// Looks up an element attribute by exact name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Self::Element { attributes, .. } => attributes
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    node: SafeNode,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// The sanitized output tree.
///
/// # Example
///
/// ```rust
/// use sanitree_ast::{SafeNode, SafeTree};
///
/// let mut tree = SafeTree::new();
/// let root = tree.root();
/// let rp = tree.append_child(root, SafeNode::element("rp"));
/// tree.append_child(rp, SafeNode::text("x"));
///
/// assert_eq!(tree.parent(rp), Some(root));
/// assert_eq!(tree.texts(), vec!["x"]);
/// assert_eq!(tree.to_string(), "Document\n  Element(rp)\n    Text(\"x\")\n");
/// ```
#[derive(Debug, Clone)]
pub struct SafeTree {
    slots: Vec<Slot>,
}

impl SafeTree {
    const ROOT: NodeId = NodeId(0);

    /// Creates a tree holding only the `Document` root.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                node: SafeNode::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Returns the `Document` root.
    #[inline]
    pub const fn root(&self) -> NodeId {
        Self::ROOT
    }

    /// Returns the node stored under `id`.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SafeNode {
        &self.slots[id.0].node
    }

    /// Returns the node stored under `id` for in-place edits.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SafeNode {
        &mut self.slots[id.0].node
    }

    /// Returns the parent of `id`, `None` for the root and detached nodes.
    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots[id.0].parent
    }

    /// Returns the ordered children of `id`.
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.slots[id.0].children
    }

    /// Appends `node` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, node: SafeNode) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Slot {
            node,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.slots[parent.0].children.push(id);
        id
    }

    /// Removes `id` (and with it its subtree) from its parent.
    ///
    /// The slot stays allocated but is unreachable from the root. Detaching
    /// the root or an already detached node does nothing.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.slots[id.0].parent.take() else {
            return;
        };
        self.slots[parent.0].children.retain(|child| *child != id);
    }

    /// Returns true if `id` is reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current == Self::ROOT
    }

    /// Iterates over `id` and its attached descendants in document order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }

    /// Returns the content of every text node in document order.
    pub fn texts(&self) -> Vec<&str> {
        self.descendants(Self::ROOT)
            .filter_map(|id| self.get(id).text_content())
            .collect()
    }

    /// Returns the number of elements reachable from the root.
    pub fn element_count(&self) -> usize {
        self.descendants(Self::ROOT)
            .filter(|id| self.get(*id).kind() == SafeKind::Element)
            .count()
    }

    /// Returns the number of nodes reachable from the root, root included.
    pub fn node_count(&self) -> usize {
        self.descendants(Self::ROOT).count()
    }

    /// Returns the nesting depth of the deepest reachable node, with the
    /// root at depth 0.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(Self::ROOT, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(self.children(id).iter().map(|child| (*child, depth + 1)));
        }
        deepest
    }
}

impl Default for SafeTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order iterator returned by [`SafeTree::descendants`].
pub struct Descendants<'t> {
    tree: &'t SafeTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Renders an indented outline, one node per line.
impl fmt::Display for SafeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![(Self::ROOT, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            write!(f, "{:indent$}", "", indent = depth * 2)?;
            match self.get(id) {
                SafeNode::Document => writeln!(f, "Document")?,
                SafeNode::Text(content) => writeln!(f, "Text({content:?})")?,
                SafeNode::Element { tag, attributes } => {
                    write!(f, "Element({tag}")?;
                    for (name, value) in attributes {
                        write!(f, " {name}={value:?}")?;
                    }
                    writeln!(f, ")")?;
                }
            }
            stack.extend(self.children(id).iter().rev().map(|child| (*child, depth + 1)));
        }

        Ok(())
    }
}

impl Serialize for SafeTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let depth = self.depth();
        if depth > MAX_SERIALIZE_DEPTH {
            return Err(serde::ser::Error::custom(format!(
                "tree nesting depth {} exceeds the serialization limit of {}",
                depth, MAX_SERIALIZE_DEPTH
            )));
        }

        NodeRef {
            tree: self,
            id: Self::ROOT,
        }
        .serialize(serializer)
    }
}

/// Serializes one node of a tree together with its subtree.
struct NodeRef<'t> {
    tree: &'t SafeTree,
    id: NodeId,
}

impl Serialize for NodeRef<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let node = self.tree.get(self.id);
        let children = ChildrenRef {
            tree: self.tree,
            ids: self.tree.children(self.id),
        };

        match node {
            SafeNode::Document => {
                let mut state = serializer.serialize_struct("SafeNode", 2)?;
                state.serialize_field("type", &SafeKind::Document)?;
                state.serialize_field("children", &children)?;
                state.end()
            }
            SafeNode::Element { tag, attributes } => {
                let mut state = serializer.serialize_struct("SafeNode", 4)?;
                state.serialize_field("type", &SafeKind::Element)?;
                state.serialize_field("tag", tag)?;
                state.serialize_field("attributes", &AttributesRef(attributes))?;
                state.serialize_field("children", &children)?;
                state.end()
            }
            SafeNode::Text(content) => {
                let mut state = serializer.serialize_struct("SafeNode", 2)?;
                state.serialize_field("type", &SafeKind::Text)?;
                state.serialize_field("value", content)?;
                state.end()
            }
        }
    }
}

struct ChildrenRef<'t> {
    tree: &'t SafeTree,
    ids: &'t [NodeId],
}

impl Serialize for ChildrenRef<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.ids.iter().map(|id| NodeRef {
            tree: self.tree,
            id: *id,
        }))
    }
}

struct AttributesRef<'t>(&'t [(String, String)]);

impl Serialize for AttributesRef<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(name, value)| (name, value)))
    }
}
