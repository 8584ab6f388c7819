//! Token intelligence facade
//!
//! Wires the ontology, auditor, planner, and executor behind one handle.
//! The ontology is built once from the engine config and shared.

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use semtok_audit::{AuditResult, Auditor};
use semtok_migrate::{
    assess_risk, compare_scenarios, compare_with_reference, generate_scenarios, rollback, Approach,
    ExecutionOptions, MigrationExecution, MigrationExecutor, MigrationScenario, MigrationSnapshot,
    ReferenceComparison, RiskProfile, ScenarioComparison,
};
use semtok_ontology::Ontology;
use semtok_token::TokenStore;
use serde::Serialize;
use std::sync::Arc;

/// Everything the planner derives from one store
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationPlan {
    /// Audit the plan is based on
    pub audit: AuditResult,
    /// Risk profile of the audit
    pub risk: RiskProfile,
    /// Candidate scenarios
    pub scenarios: Vec<MigrationScenario>,
    /// Ranking of the scenarios
    pub comparison: Option<ScenarioComparison>,
}

impl MigrationPlan {
    /// Scenario of one approach
    #[must_use]
    pub fn scenario(&self, approach: Approach) -> Option<&MigrationScenario> {
        self.scenarios.iter().find(|s| s.approach == approach)
    }

    /// Recommended scenario
    #[must_use]
    pub fn recommended(&self) -> Option<&MigrationScenario> {
        let comparison = self.comparison.as_ref()?;
        self.scenario(comparison.recommended)
    }
}

/// Semantic token intelligence engine
#[derive(Debug)]
pub struct TokenIntelligence {
    config: EngineConfig,
    ontology: Arc<Ontology>,
    auditor: Auditor,
}

impl TokenIntelligence {
    /// Create engine with the standard ontology
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let ontology = Arc::new(Ontology::standard().with_lenient_config(config.lenient));
        Self::with_ontology(config, ontology)
    }

    /// Create engine over an existing ontology
    ///
    /// The ontology's own lenient config is kept.
    #[must_use]
    pub fn with_ontology(config: EngineConfig, ontology: Arc<Ontology>) -> Self {
        let auditor = Auditor::new(Arc::clone(&ontology))
            .with_config(config.audit.clone())
            .with_graph_config(config.graph);
        Self {
            config,
            ontology,
            auditor,
        }
    }

    /// Engine configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Shared ontology
    #[inline]
    #[must_use]
    pub fn ontology(&self) -> &Arc<Ontology> {
        &self.ontology
    }

    /// Run every analyzer over `store`
    #[must_use]
    pub fn audit(&self, store: &dyn TokenStore) -> AuditResult {
        self.auditor.audit(store)
    }

    /// Risk profile of an audit
    #[allow(clippy::unused_self)]
    #[must_use]
    pub fn assess_risk(&self, audit: &AuditResult) -> RiskProfile {
        assess_risk(audit)
    }

    /// Audit, assess, generate scenarios, and rank them
    #[must_use]
    pub fn plan(&self, store: &dyn TokenStore) -> MigrationPlan {
        let audit = self.audit(store);
        let risk = assess_risk(&audit);
        let scenarios = generate_scenarios(&audit, &risk, &self.ontology, &self.config.migration);
        let comparison = compare_scenarios(&scenarios, &self.config.migration.comparator);

        tracing::info!(
            score = audit.score(),
            risk = risk.overall,
            scenarios = scenarios.len(),
            recommended = ?comparison.as_ref().map(|c| c.recommended.as_str()),
            "Migration plan ready"
        );

        MigrationPlan {
            audit,
            risk,
            scenarios,
            comparison,
        }
    }

    /// Execute one scenario against `store`
    #[must_use]
    pub fn execute(
        &self,
        scenario: &MigrationScenario,
        store: &mut dyn TokenStore,
        options: &ExecutionOptions,
    ) -> MigrationExecution {
        MigrationExecutor::new(&self.ontology).execute(scenario, store, options)
    }

    /// Plan and execute the scenario of `approach`
    ///
    /// # Errors
    /// Returns [`EngineError::ScenarioNotFound`] when the planner produced
    /// no scenario for the approach.
    pub fn migrate(
        &self,
        store: &mut dyn TokenStore,
        approach: Approach,
        options: &ExecutionOptions,
    ) -> Result<(MigrationPlan, MigrationExecution)> {
        let plan = self.plan(&*store);
        let scenario = plan
            .scenario(approach)
            .ok_or(EngineError::ScenarioNotFound(approach))?;
        let execution = self.execute(scenario, store, options);
        Ok((plan, execution))
    }

    /// Restore `store` to a snapshot
    #[allow(clippy::unused_self)]
    pub fn rollback(&self, store: &mut dyn TokenStore, snapshot: &MigrationSnapshot) {
        rollback(store, snapshot);
    }

    /// Compare `current` against a reference design system
    #[must_use]
    pub fn compare_with_reference(
        &self,
        current: &dyn TokenStore,
        reference: &dyn TokenStore,
    ) -> ReferenceComparison {
        compare_with_reference(&self.ontology, current, reference)
    }
}

impl Default for TokenIntelligence {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
