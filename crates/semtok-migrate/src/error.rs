//! Error types for migration
//!
//! Per-token failures during execution are recorded on the operation, not
//! raised. These errors are the unexpected channel an action handler uses;
//! the executor catches them at the phase boundary.

use semtok_token::TokenError;

/// Migration error type
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Token store rejected a mutation
    #[error("store error: {0}")]
    Store(#[from] TokenError),

    /// Approach identifier not recognised
    #[error("unknown approach: {0}")]
    UnknownApproach(String),
}

/// Result type for migration operations
pub type Result<T> = std::result::Result<T, MigrationError>;
