//! Semtok Audit
//!
//! Read-only analyzers over a token store and the weighted health score
//! that summarises them.
//!
//! # Overview
//!
//! - **Structure**: naming compliance and per-axis histograms
//! - **Scoping**: value kinds and context surfaces
//! - **Coverage**: the UX context x property class matrix
//! - **Accessibility**: background/foreground pairs checked through a
//!   [`ContrastChecker`]
//! - **Anti-patterns**: leakage, inconsistency, redundancy, drift, and
//!   missing variants
//! - **Health**: one weighted score in `[0, 100]`
//!
//! # Example
//!
//! ```rust
//! use semtok_audit::Auditor;
//! use semtok_ontology::Ontology;
//! use semtok_token::MemoryTokenStore;
//! use std::sync::Arc;
//!
//! let store = MemoryTokenStore::from_raw([
//!     ("background.action.accent", "#3B82F6"),
//!     ("text.action.accent", "#FFFFFF"),
//! ]);
//!
//! let result = Auditor::new(Arc::new(Ontology::standard())).audit(&store);
//! assert_eq!(result.accessibility.total_pairs, 1);
//! assert!(result.score() <= 100);
//! ```

#![warn(missing_docs)]

mod accessibility;
mod anti_patterns;
mod auditor;
pub mod config;
pub mod contrast;
mod coverage;
mod parsed;
mod scorer;
mod scoping;
mod structure;
mod suggestions;

// Re-exports
pub use accessibility::{group_key, AccessibilityReport, ContrastPair};
pub use anti_patterns::{AntiPattern, AntiPatternKind, AntiPatternReport};
pub use auditor::{AuditResult, Auditor};
pub use config::{AuditConfig, PenaltyPoints, ScoreWeights};
pub use contrast::{ContrastChecker, ContrastResult, StandardContrast, WcagLevels};
pub use coverage::{analyze_coverage, ContextCoverage, CoverageCell, CoverageGap, CoverageReport};
pub use scorer::{health_score, HealthScore, ScoreBreakdown, ScoreInputs};
pub use scoping::{analyze_scoping, ScopingIssue, ScopingIssueKind, ScopingReport};
pub use structure::{analyze_structure, StructureReport};
pub use suggestions::{suggest_migrations, MigrationSuggestion};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for auditing
    pub use crate::{AuditConfig, AuditResult, Auditor, ContrastChecker, HealthScore};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
