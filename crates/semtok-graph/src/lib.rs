//! Semtok Dependency Graph
//!
//! Directed reference graph over a token store, built from the embedded
//! `{path}` grammar.
//!
//! # Overview
//!
//! - **Nodes**: one per token, classified primitive / semantic / unknown
//! - **Edges**: one per reference, marked resolved iff the target exists
//! - **Issues**: circular, unresolved, deep-chain, and orphaned findings
//!
//! # Example
//!
//! ```rust
//! use semtok_graph::{DependencyGraph, IssueKind};
//! use semtok_token::MemoryTokenStore;
//!
//! let store = MemoryTokenStore::from_raw([("a", "{b}"), ("b", "{a}")]);
//! let graph = DependencyGraph::build(&store);
//!
//! assert_eq!(graph.issues_of(IssueKind::Circular).count(), 1);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod graph;
pub mod issue;

// Re-exports
pub use error::{GraphError, Result};
pub use graph::{DependencyGraph, GraphConfig, GraphEdge, GraphMetrics, GraphNode, NodeKind};
pub use issue::{GraphIssue, IssueKind, Severity};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for graph analysis
    pub use crate::{DependencyGraph, GraphConfig, GraphIssue, IssueKind, NodeKind, Severity};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
