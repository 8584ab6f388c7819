//! Graph error types

use thiserror::Error;

/// Errors raised by graph queries
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    /// Query needs an acyclic graph
    #[error("cycle detected through {0}")]
    CycleDetected(String),

    /// Path is not a node of the graph
    #[error("node not found: {0}")]
    NodeNotFound(String),
}

/// Result alias for graph queries
pub type Result<T> = std::result::Result<T, GraphError>;
