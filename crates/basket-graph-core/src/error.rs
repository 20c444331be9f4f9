//! Error types for basket-graph-core.
//!
//! This module defines the central error type [`CoreError`] used throughout
//! the crate, along with the [`CoreResult<T>`] type alias.
//!
//! # Examples
//!
//! ```rust
//! use basket_graph_core::CoreError;
//!
//! fn lookup_item(name: &str) -> Result<(), CoreError> {
//!     Err(CoreError::UnknownNode { item: name.to_string() })
//! }
//!
//! let result = lookup_item("Dragon Fruit");
//! assert!(result.is_err());
//! ```

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Top-level error type for basket-graph-core operations.
///
/// Every failure is scoped to a single recommendation request; no variant
/// is fatal to the process. Callers turn errors into an empty or partial
/// result plus a user-facing message.
#[derive(Debug, Error)]
pub enum CoreError {
    // ========== Graph Lookup Errors ==========
    /// A requested item is not a node of the co-purchase graph.
    ///
    /// Recoverable: the caller should re-prompt or skip the item.
    #[error("Unknown node: {item}")]
    UnknownNode {
        /// The item name that was not found
        item: String,
    },

    /// A walk was started from a node with no candidates within the cutoff.
    ///
    /// Raised only when nothing has been collected yet; a dead end after at
    /// least one completed hop truncates the walk instead.
    #[error("No neighbours within cutoff of: {item}")]
    NoNeighbours {
        /// The isolated item name
        item: String,
    },

    /// An edge-weight lookup was made between non-adjacent nodes.
    ///
    /// Only reachable when a walk runs with `cutoff > 1`, where candidates
    /// at distance > 1 carry no direct edge. Treated as a configuration
    /// error and failed fast rather than silently mis-scoring candidates.
    #[error("No direct edge between {from} and {to}")]
    MissingEdge {
        /// Current node of the walk
        from: String,
        /// Candidate without a direct edge
        to: String,
    },

    /// An edge insert violated a graph invariant.
    ///
    /// Self-loops and non-positive or NaN weights are rejected at
    /// construction so every stored edge satisfies `weight > 0`.
    #[error("Invalid edge {from} - {to}: {reason}")]
    InvalidEdge {
        /// First endpoint
        from: String,
        /// Second endpoint
        to: String,
        /// Why the edge was rejected
        reason: String,
    },

    // ========== Embedding Errors ==========
    /// An item has no vector in the embedding model's vocabulary.
    ///
    /// Recoverable: the caller should re-prompt or fall back to a
    /// graph-based strategy.
    #[error("Unknown item in embedding vocabulary: {item}")]
    UnknownItem {
        /// The item name absent from the model
        item: String,
    },

    /// Embedding vector dimension does not match the model's dimension.
    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension the model was created with
        expected: usize,
        /// Dimension of the rejected vector
        actual: usize,
    },

    // ========== Configuration Errors ==========
    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<config::ConfigError> for CoreError {
    fn from(err: config::ConfigError) -> Self {
        CoreError::ConfigError(err.to_string())
    }
}
