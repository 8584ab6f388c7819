//! Semtok Core
//!
//! Facade over the semtok layers. [`TokenIntelligence`] owns the shared
//! ontology and configuration and exposes the full pipeline: audit, risk,
//! scenario planning, execution, rollback, and reference comparison.
//!
//! # Example
//!
//! ```rust
//! use semtok_core::{EngineConfig, TokenIntelligence};
//! use semtok_migrate::{Approach, ExecutionOptions};
//! use semtok_token::{MemoryTokenStore, TokenStore};
//!
//! let engine = TokenIntelligence::new(EngineConfig::default());
//! let mut store = MemoryTokenStore::from_raw([
//!     ("color.blue.500", "#3B82F6"),
//!     ("bg.button.primary", "{color.blue.500}"),
//! ]);
//!
//! let plan = engine.plan(&store);
//! assert_eq!(plan.scenarios.len(), 3);
//!
//! let (_, execution) = engine
//!     .migrate(&mut store, Approach::Progressive, &ExecutionOptions::default())
//!     .unwrap();
//! assert!(store.contains("background.action.accent"));
//!
//! engine.rollback(&mut store, execution.snapshot.as_ref().unwrap());
//! assert!(store.contains("bg.button.primary"));
//! ```

#![warn(missing_docs)]

pub mod config;
mod engine;
mod error;

// Re-exports
pub use config::EngineConfig;
pub use engine::{MigrationPlan, TokenIntelligence};
pub use error::{ConfigError, EngineError, Result};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the engine
    pub use crate::{EngineConfig, EngineError, MigrationPlan, TokenIntelligence};
    pub use semtok_migrate::{Approach, ExecutionOptions};
    pub use semtok_token::{MemoryTokenStore, TokenStore};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
