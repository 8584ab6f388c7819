//! Token store error types

use thiserror::Error;

/// Errors raised by store-level edits
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    /// No token stored at the path
    #[error("token not found: {0}")]
    NotFound(String),

    /// A token is already stored at the path
    #[error("token already exists: {0}")]
    AlreadyExists(String),
}

/// Result alias for store edits
pub type Result<T> = std::result::Result<T, TokenError>;
