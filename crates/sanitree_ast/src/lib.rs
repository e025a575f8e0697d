//! # sanitree_ast
//!
//! Tree definitions for sanitree.
//!
//! This crate provides the two trees the sanitizer works on:
//!
//! - [`DomNode`]: the untrusted, already-parsed input document. Nodes are
//!   `Copy` and arena-allocated in a [`DomArena`].
//! - [`SafeTree`]: the sanitized output. An index arena of [`SafeNode`]s rooted
//!   at a `Document`, owned by the caller once traversal returns.
//!
//! ## Architecture
//!
//! - Uses `bumpalo` for Arena allocation of the input tree
//! - The whole input document lives in a single arena and is freed at once
//! - The output tree addresses nodes by [`NodeId`]; parent links are plain
//!   indices, so no reference cycles and no shared ownership
//!
//! ## Example
//!
//! ```rust
//! use sanitree_ast::{DomArena, SafeNode, SafeTree};
//!
//! let arena = DomArena::new();
//! let input = arena.element("body", &[arena.text("hi"), arena.comment("c")]);
//! assert_eq!(input.children.len(), 2);
//!
//! let mut output = SafeTree::new();
//! output.append_child(output.root(), SafeNode::text("hi"));
//! assert_eq!(output.texts(), vec!["hi"]);
//! ```

mod arena;
mod dom;
mod safe;

pub use arena::DomArena;
pub use dom::{DomAttribute, DomKind, DomNode};
pub use safe::{Descendants, MAX_SERIALIZE_DEPTH, NodeId, SafeKind, SafeNode, SafeTree};
