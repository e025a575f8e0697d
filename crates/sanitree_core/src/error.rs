//! Sanitizer error types.

use thiserror::Error;

/// Errors that can occur while building or running a sanitizer.
///
/// Hostile markup never produces an error by itself: content no visitor
/// accepts is dropped silently. Errors are reserved for exhausted limits,
/// misbehaving visitors and invalid configuration.
#[derive(Debug, Error)]
pub enum SanitizeError {
    /// The input nests elements deeper than the configured limit.
    #[error("Maximum nesting depth of {max} exceeded")]
    DepthExceeded { max: usize },

    /// The input holds more nodes than the configured limit.
    #[error("Maximum node count of {max} exceeded")]
    SizeExceeded { max: usize },

    /// A visitor did not restore the cursor it moved.
    #[error("Visitors left the cursor unbalanced after <{element}>")]
    UnbalancedCursor { element: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SanitizeError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an unbalanced cursor error for the given element.
    pub fn unbalanced(element: impl Into<String>) -> Self {
        Self::UnbalancedCursor {
            element: element.into(),
        }
    }
}
