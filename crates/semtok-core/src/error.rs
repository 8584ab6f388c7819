//! Error types for the engine facade

use semtok_migrate::{Approach, MigrationError};
use semtok_token::TokenError;
use std::path::PathBuf;

/// Configuration loading failure
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for [`crate::EngineConfig`]
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Engine facade error
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Migration error
    #[error(transparent)]
    Migration(#[from] MigrationError),

    /// Token store error
    #[error(transparent)]
    Token(#[from] TokenError),

    /// The plan has no scenario for the requested approach
    #[error("no {0} scenario in plan")]
    ScenarioNotFound(Approach),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
