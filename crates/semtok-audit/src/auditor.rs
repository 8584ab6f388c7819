//! Audit aggregator
//!
//! Runs every analyzer over one store snapshot and folds the findings into
//! a single serializable [`AuditResult`].

use crate::accessibility::{analyze_accessibility, AccessibilityReport};
use crate::anti_patterns::{detect_anti_patterns, AntiPatternReport};
use crate::config::AuditConfig;
use crate::contrast::{ContrastChecker, StandardContrast};
use crate::coverage::{analyze_coverage, CoverageReport};
use crate::parsed::parse_store;
use crate::scorer::{health_score, HealthScore, ScoreInputs};
use crate::scoping::{analyze_scoping, ScopingReport};
use crate::structure::{analyze_structure, StructureReport};
use crate::suggestions::{suggest_migrations, MigrationSuggestion};
use chrono::{DateTime, Utc};
use semtok_graph::{DependencyGraph, GraphConfig};
use semtok_ontology::Ontology;
use semtok_token::TokenStore;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Aggregated audit of one token store
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    /// Number of tokens audited
    pub token_count: usize,
    /// Naming compliance
    pub structure: StructureReport,
    /// Scoping violations
    pub scoping: ScopingReport,
    /// Context x class coverage
    pub coverage: CoverageReport,
    /// Contrast pairs
    pub accessibility: AccessibilityReport,
    /// Reference graph with its issues
    pub dependencies: DependencyGraph,
    /// Anti-pattern findings
    pub anti_patterns: AntiPatternReport,
    /// Weighted health score
    pub health: HealthScore,
    /// Renames for non-compliant paths
    pub suggestions: Vec<MigrationSuggestion>,
    /// When the audit ran
    pub generated_at: DateTime<Utc>,
}

impl AuditResult {
    /// Health score in `[0, 100]`
    #[inline]
    #[must_use]
    pub fn score(&self) -> u8 {
        self.health.score
    }

    /// Error-severity findings across all reports
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.scoping.errors + self.dependencies.error_count() + self.anti_patterns.errors
    }

    /// Warning-severity findings across all reports
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.scoping.warnings + self.dependencies.warning_count() + self.anti_patterns.warnings
    }
}

/// Runs the analyzers with a shared ontology
pub struct Auditor {
    ontology: Arc<Ontology>,
    config: AuditConfig,
    graph_config: GraphConfig,
    checker: Box<dyn ContrastChecker>,
}

impl fmt::Debug for Auditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auditor")
            .field("config", &self.config)
            .field("graph_config", &self.graph_config)
            .finish_non_exhaustive()
    }
}

impl Auditor {
    /// Create auditor with default thresholds and the standard contrast checker
    #[must_use]
    pub fn new(ontology: Arc<Ontology>) -> Self {
        Self {
            ontology,
            config: AuditConfig::default(),
            graph_config: GraphConfig::default(),
            checker: Box::new(StandardContrast),
        }
    }

    /// Builder: analyzer thresholds
    #[must_use]
    pub fn with_config(mut self, config: AuditConfig) -> Self {
        self.config = config;
        self
    }

    /// Builder: graph thresholds
    #[must_use]
    pub fn with_graph_config(mut self, config: GraphConfig) -> Self {
        self.graph_config = config;
        self
    }

    /// Builder: contrast collaborator
    #[must_use]
    pub fn with_checker(mut self, checker: impl ContrastChecker + 'static) -> Self {
        self.checker = Box::new(checker);
        self
    }

    /// Get ontology
    #[inline]
    #[must_use]
    pub fn ontology(&self) -> &Ontology {
        &self.ontology
    }

    /// Get analyzer thresholds
    #[inline]
    #[must_use]
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Audit a store
    ///
    /// Read-only over the store. Findings are returned, never raised.
    pub fn audit(&self, store: &dyn TokenStore) -> AuditResult {
        tracing::info!(tokens = store.len(), "Starting audit");
        let ontology = self.ontology.as_ref();

        let parsed = parse_store(ontology, store);
        let structure = analyze_structure(ontology, store);
        let scoping = analyze_scoping(ontology, store);
        let coverage = analyze_coverage(ontology, store);
        let accessibility = analyze_accessibility(&parsed, store, self.checker.as_ref(), &self.config);
        let dependencies = DependencyGraph::build_with(store, &self.graph_config);
        let anti_patterns = detect_anti_patterns(&parsed, store, &self.config);
        let suggestions = suggest_migrations(ontology, store, self.config.suggestion_min_confidence);

        tracing::debug!(
            compliance = structure.compliance_rate,
            coverage = coverage.score,
            pairs = accessibility.total_pairs,
            graph_errors = dependencies.error_count(),
            graph_warnings = dependencies.warning_count(),
            anti_patterns = anti_patterns.patterns.len(),
            "Analyzers finished"
        );

        let inputs = ScoreInputs {
            compliance_rate: structure.compliance_rate,
            coverage: coverage.score,
            scoping_errors: scoping.errors,
            scoping_warnings: scoping.warnings,
            contrast_pass_rate: accessibility.pass_rate,
            dependency_errors: dependencies.error_count(),
            dependency_warnings: dependencies.warning_count(),
            anti_pattern_errors: anti_patterns.errors,
            anti_pattern_warnings: anti_patterns.warnings,
        };
        let health = health_score(&inputs, &self.config.weights, &self.config.penalties);

        tracing::info!(
            score = health.score,
            suggestions = suggestions.len(),
            "Audit complete"
        );

        AuditResult {
            token_count: store.len(),
            structure,
            scoping,
            coverage,
            accessibility,
            dependencies,
            anti_patterns,
            health,
            suggestions,
            generated_at: Utc::now(),
        }
    }
}
