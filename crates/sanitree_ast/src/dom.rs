//! Input tree definition.
//!
//! [`DomNode`] is the read-only, already-parsed document handed to the
//! sanitizer. It mirrors the subset of the DOM the traversal needs: node
//! kind, tag name, attributes and ordered children.

use serde::{Deserialize, Serialize};

/// Kind of an input node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomKind {
    /// An element with a tag name, attributes and children.
    Element,
    /// A character data node.
    Text,
    /// A comment. Never copied to the output.
    Comment,
}

impl DomKind {
    /// Returns the DOM `nodeName` used for non-element nodes.
    #[inline]
    pub const fn node_name(&self) -> &'static str {
        match self {
            DomKind::Element => "",
            DomKind::Text => "#text",
            DomKind::Comment => "#comment",
        }
    }
}

/// A single `name="value"` attribute of an input element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomAttribute<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

impl<'a> DomAttribute<'a> {
    #[inline]
    pub const fn new(name: &'a str, value: &'a str) -> Self {
        Self { name, value }
    }
}

/// A node of the input tree.
///
/// Nodes are `Copy` and borrow everything from a [`DomArena`](crate::DomArena),
/// so handing them around the traversal costs nothing.
///
/// # Example
///
/// ```rust
/// use sanitree_ast::{DomArena, DomKind};
///
/// let arena = DomArena::new();
/// let rp = arena.element("rp", &[arena.text("x")]);
///
/// assert_eq!(rp.kind, DomKind::Element);
/// assert_eq!(rp.name, "rp");
/// assert_eq!(rp.children[0].name, "#text");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DomNode<'a> {
    /// The kind of this node.
    pub kind: DomKind,

    /// DOM `nodeName`: the tag name for elements, `#text` or `#comment` otherwise.
    pub name: &'a str,

    /// Character data (for text and comment nodes).
    pub value: Option<&'a str>,

    /// Attributes in source order (elements only).
    pub attributes: &'a [DomAttribute<'a>],

    /// Child nodes in document order (elements only).
    pub children: &'a [DomNode<'a>],
}

impl<'a> DomNode<'a> {
    /// Creates an element node.
    #[inline]
    pub const fn new_element(
        name: &'a str,
        attributes: &'a [DomAttribute<'a>],
        children: &'a [DomNode<'a>],
    ) -> Self {
        Self {
            kind: DomKind::Element,
            name,
            value: None,
            attributes,
            children,
        }
    }

    /// Creates a text node.
    #[inline]
    pub const fn new_text(value: &'a str) -> Self {
        Self {
            kind: DomKind::Text,
            name: DomKind::Text.node_name(),
            value: Some(value),
            attributes: &[],
            children: &[],
        }
    }

    /// Creates a comment node.
    #[inline]
    pub const fn new_comment(value: &'a str) -> Self {
        Self {
            kind: DomKind::Comment,
            name: DomKind::Comment.node_name(),
            value: Some(value),
            attributes: &[],
            children: &[],
        }
    }

    #[inline]
    pub const fn is_element(&self) -> bool {
        matches!(self.kind, DomKind::Element)
    }

    #[inline]
    pub const fn is_text(&self) -> bool {
        matches!(self.kind, DomKind::Text)
    }

    #[inline]
    pub const fn is_comment(&self) -> bool {
        matches!(self.kind, DomKind::Comment)
    }

    /// Returns true if this node has children.
    #[inline]
    pub const fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the tag name of an element, `None` for other kinds.
    #[inline]
    pub fn tag(&self) -> Option<&'a str> {
        self.is_element().then_some(self.name)
    }

    /// Returns true if this is an element whose tag matches `name`
    /// (ASCII case-insensitive, as HTML tag names are).
    #[inline]
    pub fn is_element_named(&self, name: &str) -> bool {
        self.is_element() && self.name.eq_ignore_ascii_case(name)
    }

    /// Returns the character data of a text or comment node.
    #[inline]
    pub const fn text(&self) -> Option<&'a str> {
        self.value
    }

    /// Looks up an attribute value by name (ASCII case-insensitive).
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.attributes
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
            .map(|attr| attr.value)
    }
}

impl<'a> Serialize for DomNode<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        match self.kind {
            DomKind::Element => {
                let mut state = serializer.serialize_struct("DomNode", 4)?;
                state.serialize_field("type", &self.kind)?;
                state.serialize_field("name", self.name)?;
                state.serialize_field("attributes", &AttributeMap(self.attributes))?;
                state.serialize_field("children", self.children)?;
                state.end()
            }
            DomKind::Text | DomKind::Comment => {
                let mut state = serializer.serialize_struct("DomNode", 2)?;
                state.serialize_field("type", &self.kind)?;
                state.serialize_field("value", self.value.unwrap_or_default())?;
                state.end()
            }
        }
    }
}

/// Serializes attributes as a JSON object, keeping source order.
struct AttributeMap<'s, 'a>(&'s [DomAttribute<'a>]);

impl Serialize for AttributeMap<'_, '_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.0.iter().map(|attr| (attr.name, attr.value)))
    }
}
