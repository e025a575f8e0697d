//! Traversal limits.

use serde::{Deserialize, Serialize};

/// Default ceiling on element nesting.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Bounds applied to a single traversal.
///
/// Exceeding a bound aborts the traversal with
/// [`SanitizeError::DepthExceeded`](crate::SanitizeError::DepthExceeded) or
/// [`SanitizeError::SizeExceeded`](crate::SanitizeError::SizeExceeded); the
/// output is never truncated silently. `None` disables a bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalLimits {
    /// Maximum element nesting depth. The input root is at depth 0.
    pub max_depth: Option<usize>,

    /// Maximum number of visited elements and copied text nodes.
    pub max_nodes: Option<usize>,
}

impl TraversalLimits {
    /// Limits that never abort a traversal.
    pub const fn unbounded() -> Self {
        Self {
            max_depth: None,
            max_nodes: None,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub const fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Returns true if `depth` is within the depth bound.
    #[inline]
    pub fn allows_depth(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }

    /// Returns true if `count` nodes are within the size bound.
    #[inline]
    pub fn allows_nodes(&self, count: usize) -> bool {
        self.max_nodes.is_none_or(|max| count <= max)
    }
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            max_nodes: None,
        }
    }
}
