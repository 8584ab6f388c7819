//! Semtok Migrate
//!
//! Turns an audit into something actionable: a risk profile, three
//! candidate migration scenarios, a ranking between them, and an executor
//! that applies a scenario with reference rewriting and snapshot rollback.
//!
//! # Example
//!
//! ```rust
//! use semtok_audit::Auditor;
//! use semtok_migrate::{
//!     assess_risk, generate_scenarios, Approach, ExecutionOptions, MigrationConfig,
//!     MigrationExecutor,
//! };
//! use semtok_ontology::Ontology;
//! use semtok_token::{MemoryTokenStore, TokenStore};
//! use std::sync::Arc;
//!
//! let ontology = Arc::new(Ontology::standard());
//! let mut store = MemoryTokenStore::from_raw([
//!     ("bg.button.primary", "#3B82F6"),
//!     ("fg.button.primary", "#FFFFFF"),
//! ]);
//!
//! let audit = Auditor::new(ontology.clone()).audit(&store);
//! let risk = assess_risk(&audit);
//! let scenarios = generate_scenarios(&audit, &risk, &ontology, &MigrationConfig::default());
//! assert_eq!(scenarios.len(), 3);
//!
//! let conservative = scenarios
//!     .iter()
//!     .find(|s| s.approach == Approach::Conservative)
//!     .unwrap();
//! let execution = MigrationExecutor::new(&ontology).execute(
//!     conservative,
//!     &mut store,
//!     &ExecutionOptions::preview(),
//! );
//! assert!(execution.dry_run);
//! assert!(store.contains("bg.button.primary"));
//! ```

#![warn(missing_docs)]

mod comparator;
pub mod config;
mod error;
mod executor;
mod plan;
mod reference_set;
mod risk;
mod scenarios;
mod snapshot;
mod validation;

// Re-exports
pub use comparator::{compare_scenarios, ScenarioComparison, ScenarioScore, ScoreContributions};
pub use config::{ComparatorWeights, MigrationConfig, TeamCapacities, TeamCapacity};
pub use error::{MigrationError, Result};
pub use executor::{
    ActionExecution, ExecutionOptions, ExecutionStats, ExecutionStatus, MigrationExecution,
    MigrationExecutor, PhaseExecution, TokenOperation,
};
pub use plan::{
    ActionKind, Approach, MigrationAction, MigrationPhase, MigrationScenario, ScenarioId,
    ValidationCheck,
};
pub use reference_set::{compare_with_reference, ReferenceComparison};
pub use risk::{assess_risk, RiskLevel, RiskProfile};
pub use scenarios::generate_scenarios;
pub use snapshot::{create_snapshot, rollback, MigrationSnapshot, SnapshotId};
pub use validation::{run_checks, ValidationResult};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for planning and executing migrations
    pub use crate::{
        assess_risk, compare_scenarios, generate_scenarios, Approach, ExecutionOptions,
        MigrationConfig, MigrationExecutor, MigrationScenario, RiskProfile,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
