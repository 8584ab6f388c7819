//! Ontology error types

use thiserror::Error;

/// Errors raised by ontology lookups and strict parsing
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OntologyError {
    /// Identifier is not part of an axis catalog
    #[error("unknown {axis} identifier: {id}")]
    UnknownIdentifier {
        /// Axis name
        axis: &'static str,
        /// Offending identifier
        id: String,
    },

    /// Path does not follow the canonical grammar
    #[error("non-canonical token path: {0}")]
    NonCanonical(String),

    /// Path has no recognizable property class
    #[error("no property class found in path: {0}")]
    NoPropertyClass(String),
}

/// Result alias for ontology operations
pub type Result<T> = std::result::Result<T, OntologyError>;
