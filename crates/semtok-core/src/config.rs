//! Engine configuration
//!
//! One TOML document with four optional sections. Missing sections and
//! missing keys fall back to the defaults of the owning crate.
//!
//! ```toml
//! [lenient]
//! floor = 0.4
//!
//! [graph]
//! deep_chain_threshold = 4
//!
//! [audit]
//! wcag_min_ratio = 7.0
//!
//! [migration]
//! low_risk_rename_confidence = 0.9
//! ```

use crate::error::ConfigError;
use semtok_audit::AuditConfig;
use semtok_graph::GraphConfig;
use semtok_migrate::MigrationConfig;
use semtok_ontology::LenientConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Aggregated configuration of every layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Lenient parser scoring
    pub lenient: LenientConfig,
    /// Graph analyzer thresholds
    pub graph: GraphConfig,
    /// Analyzer thresholds and score weights
    pub audit: AuditConfig,
    /// Scenario generation and comparison
    pub migration: MigrationConfig,
}

impl EngineConfig {
    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on malformed TOML or mistyped keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Parse`] when its content is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "Loaded engine config");
        Ok(config)
    }

    /// With lenient parser config
    #[inline]
    #[must_use]
    pub fn with_lenient(mut self, lenient: LenientConfig) -> Self {
        self.lenient = lenient;
        self
    }

    /// With graph config
    #[inline]
    #[must_use]
    pub fn with_graph(mut self, graph: GraphConfig) -> Self {
        self.graph = graph;
        self
    }

    /// With audit config
    #[inline]
    #[must_use]
    pub fn with_audit(mut self, audit: AuditConfig) -> Self {
        self.audit = audit;
        self
    }

    /// With migration config
    #[inline]
    #[must_use]
    pub fn with_migration(mut self, migration: MigrationConfig) -> Self {
        self.migration = migration;
        self
    }
}
