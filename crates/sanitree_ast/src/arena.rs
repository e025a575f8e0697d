//! Arena allocator for input tree nodes.
//!
//! Uses `bumpalo` for bump allocation of [`DomNode`]s. A parser adapter
//! allocates the whole input document in one arena; every node, attribute
//! and string borrows from it and is freed together when the arena drops.

use bumpalo::Bump;

use crate::{DomAttribute, DomNode};

/// Arena allocator for input tree nodes.
///
/// Besides the raw allocation methods, the arena offers builder helpers
/// that allocate the strings and child slices a [`DomNode`] borrows.
///
/// # Example
///
/// ```rust
/// use sanitree_ast::DomArena;
///
/// let arena = DomArena::new();
///
/// let text = arena.text("hello");
/// let comment = arena.comment("ignored");
/// let body = arena.element("body", &[text, comment]);
///
/// assert_eq!(body.children.len(), 2);
/// assert_eq!(body.tag(), Some("body"));
/// ```
pub struct DomArena {
    bump: Bump,
}

impl DomArena {
    /// Creates a new arena allocator.
    #[inline]
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Creates a new arena with the specified initial capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    /// Allocates a value in the arena and returns a reference to it.
    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.bump.alloc(val)
    }

    /// Allocates a string slice in the arena.
    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// Allocates a slice in the arena by copying from the input slice.
    #[inline]
    pub fn alloc_slice_copy<T: Copy>(&self, slice: &[T]) -> &[T] {
        self.bump.alloc_slice_copy(slice)
    }

    /// Creates a text node whose value is copied into the arena.
    pub fn text(&self, value: &str) -> DomNode<'_> {
        DomNode::new_text(self.alloc_str(value))
    }

    /// Creates a comment node whose value is copied into the arena.
    pub fn comment(&self, value: &str) -> DomNode<'_> {
        DomNode::new_comment(self.alloc_str(value))
    }

    /// Creates an element without attributes.
    pub fn element<'a>(&'a self, name: &str, children: &[DomNode<'a>]) -> DomNode<'a> {
        DomNode::new_element(self.alloc_str(name), &[], self.alloc_slice_copy(children))
    }

    /// Creates an element carrying the given `(name, value)` attributes.
    pub fn element_with_attributes<'a>(
        &'a self,
        name: &str,
        attributes: &[(&str, &str)],
        children: &[DomNode<'a>],
    ) -> DomNode<'a> {
        let attributes: Vec<DomAttribute<'a>> = attributes
            .iter()
            .map(|(name, value)| DomAttribute::new(self.alloc_str(name), self.alloc_str(value)))
            .collect();

        DomNode::new_element(
            self.alloc_str(name),
            self.alloc_slice_copy(&attributes),
            self.alloc_slice_copy(children),
        )
    }

    /// Returns the total bytes allocated in this arena.
    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Resets the arena, deallocating all allocated nodes.
    ///
    /// Note: This does NOT call `Drop` for allocated objects.
    #[inline]
    pub fn reset(&mut self) {
        self.bump.reset();
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}
