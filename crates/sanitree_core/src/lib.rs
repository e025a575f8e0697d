//! # sanitree_core
//!
//! Traversal engine for the sanitree HTML sanitizer.
//!
//! This crate provides:
//! - The [`DomVisitor`] engine that rebuilds a safe tree from an input tree
//! - The [`NodeVisitor`](visitor::NodeVisitor) contract and built-in visitors
//! - The output [`Cursor`]
//! - Configuration loading and traversal limits
//!
//! Anything no visitor accepts is dropped, with text always kept under the
//! nearest accepted ancestor. Comments never reach the output.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sanitree_core::{DomVisitor, SanitizerConfig};
//!
//! let config = SanitizerConfig::from_file(".sanitree.json")?;
//! let engine = DomVisitor::from_config(&config)?;
//!
//! let output = engine.visit(&input)?;
//! println!("{}", output);
//! ```

mod config;
mod cursor;
mod dom_visitor;
mod error;
mod extension;
mod limits;
pub mod visitor;

pub use config::{CONFIG_FILE_NAME, SanitizerConfig};
pub use cursor::Cursor;
pub use dom_visitor::DomVisitor;
pub use error::SanitizeError;
pub use extension::Extension;
pub use limits::{DEFAULT_MAX_DEPTH, TraversalLimits};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
