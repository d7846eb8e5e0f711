// Copyright 2025 Cowboy AI, LLC.

//! Error types for deep sort operations

use thiserror::Error;

/// Two values (or two projected keys) at the same sort step could not be
/// ordered against each other.
///
/// Raised by every `deep_sort*` entry point and never recovered internally:
/// a failure at any nesting depth aborts the whole call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Comparison failed at depth {depth}: {left} cannot be compared with {right}")]
pub struct ComparisonError {
    /// Rendering of the left operand
    pub left: String,
    /// Rendering of the right operand
    pub right: String,
    /// Nesting depth of the sort step that failed (0 is the top level)
    pub depth: usize,
}

/// Result type for deep sort operations
pub type DeepSortResult<T> = Result<T, ComparisonError>;

impl ComparisonError {
    /// Create a comparison error between two rendered operands
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            depth: 0,
        }
    }

    /// Record the depth at which the failing sort step ran
    pub fn at_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}

/// A value could not be rendered as a JSON document without losing data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonConversionError {
    /// Two distinct mapping keys render to the same JSON object key
    #[error("Mapping keys {first} and {second} both render as JSON key {key:?}")]
    KeyCollision {
        /// The shared JSON key
        key: String,
        /// Inspected rendering of the earlier key
        first: String,
        /// Inspected rendering of the later key
        second: String,
    },
}
