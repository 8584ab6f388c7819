//! Scenario generator
//!
//! Three fixed templates turn one audit into conservative, progressive, and
//! comprehensive plans. Phase budgets are fixed; actions are derived from
//! the audit findings.

use crate::config::{MigrationConfig, TeamCapacity};
use crate::plan::{ActionKind, Approach, MigrationAction, MigrationPhase, MigrationScenario, ScenarioId, ValidationCheck};
use crate::risk::RiskProfile;
use semtok_audit::{AntiPatternKind, AuditResult, MigrationSuggestion};
use semtok_graph::IssueKind;
use semtok_ontology::Ontology;
use std::collections::{BTreeMap, BTreeSet};

const CONSERVATIVE_HOURS: [u32; 3] = [8, 12, 4];
const PROGRESSIVE_HOURS: [u32; 4] = [16, 40, 24, 12];
const COMPREHENSIVE_HOURS: [u32; 6] = [16, 24, 80, 40, 24, 12];

const RENAME_CHECKS: &[ValidationCheck] = &[
    ValidationCheck::NoBrokenReferences,
    ValidationCheck::NamingConventionCompliance,
];
const REFERENCE_CHECKS: &[ValidationCheck] = &[ValidationCheck::NoBrokenReferences];
const NAMING_CHECKS: &[ValidationCheck] = &[ValidationCheck::NamingConventionCompliance];

/// Findings the templates draw actions from
struct Findings<'a> {
    unresolved: Vec<String>,
    suggestions: &'a [MigrationSuggestion],
    low_risk: Vec<&'a MigrationSuggestion>,
    non_canonical: Vec<String>,
    gaps: Vec<String>,
    missing_defaults: Vec<String>,
    redundant: Vec<Vec<String>>,
    orphans: Vec<String>,
    /// Where renames and restructures move each path
    relocations: BTreeMap<String, String>,
}

impl<'a> Findings<'a> {
    fn collect(audit: &'a AuditResult, ontology: &Ontology, config: &MigrationConfig) -> Self {
        let graph = &audit.dependencies;

        let unresolved: BTreeSet<String> = graph
            .edges
            .iter()
            .filter(|e| !e.resolved)
            .map(|e| e.to.clone())
            .collect();

        let low_risk = audit
            .suggestions
            .iter()
            .filter(|s| s.confidence >= config.low_risk_rename_confidence)
            .filter(|s| graph.dependents(&s.from).is_empty())
            .collect();

        let canonical: Vec<(String, String)> = graph
            .nodes
            .iter()
            .filter(|n| !ontology.is_canonical(&n.path))
            .filter_map(|n| {
                ontology
                    .parse_strict(&n.path)
                    .map(|name| (n.path.clone(), name.build_path()))
            })
            .collect();
        let non_canonical = canonical.iter().map(|(from, _)| from.clone()).collect();

        let relocations = canonical
            .into_iter()
            .chain(audit.suggestions.iter().map(|s| (s.from.clone(), s.to.clone())))
            .collect();

        let gaps = audit
            .coverage
            .gaps
            .iter()
            .map(|g| g.suggested_path.clone())
            .collect();

        let missing_defaults: BTreeSet<String> = audit
            .anti_patterns
            .of_kind(AntiPatternKind::MissingVariant)
            .filter_map(|p| p.paths.first())
            .filter_map(|path| ontology.parse_lenient(path))
            .map(|parse| {
                let mut name = parse.name;
                name.state = None;
                name.build_path()
            })
            .collect();

        let redundant = audit
            .anti_patterns
            .of_kind(AntiPatternKind::RedundantTokens)
            .filter(|p| p.paths.len() >= 2)
            .map(|p| p.paths.clone())
            .collect();

        let orphans = graph
            .issues_of(IssueKind::Orphaned)
            .flat_map(|i| i.paths.iter().cloned())
            .collect();

        Self {
            unresolved: unresolved.into_iter().collect(),
            suggestions: &audit.suggestions,
            low_risk,
            non_canonical,
            gaps,
            missing_defaults: missing_defaults.into_iter().collect(),
            redundant,
            orphans,
            relocations,
        }
    }

    /// Path `path` will have once the earlier phases have run
    fn relocated(&self, path: &str) -> String {
        self.relocations.get(path).map_or_else(|| path.to_string(), Clone::clone)
    }

    /// Redundant groups addressed by their post-rename paths
    fn relocated_redundant(&self) -> Vec<Vec<String>> {
        self.redundant
            .iter()
            .filter_map(|group| {
                let mut seen = BTreeSet::new();
                let relocated: Vec<String> = group
                    .iter()
                    .map(|p| self.relocated(p))
                    .filter(|p| seen.insert(p.clone()))
                    .collect();
                (relocated.len() >= 2).then_some(relocated)
            })
            .collect()
    }
}

/// Accumulates the actions of one phase
struct PhaseBuilder {
    id: String,
    name: &'static str,
    description: &'static str,
    rollback_plan: &'static str,
    actions: Vec<MigrationAction>,
}

impl PhaseBuilder {
    fn new(approach: Approach, index: usize, name: &'static str, description: &'static str) -> Self {
        Self {
            id: format!("{approach}-{}", index + 1),
            name,
            description,
            rollback_plan: "Restore the pre-phase snapshot",
            actions: Vec::new(),
        }
    }

    fn rollback(mut self, plan: &'static str) -> Self {
        self.rollback_plan = plan;
        self
    }

    fn push(&mut self, kind: ActionKind, description: String, targets: Vec<String>) -> Option<&mut MigrationAction> {
        if targets.is_empty() && kind != ActionKind::UpdateReferences {
            return None;
        }
        let id = format!("{}.{}", self.id, self.actions.len() + 1);
        self.actions.push(MigrationAction::new(id, kind, description, targets));
        self.actions.last_mut()
    }

    fn placeholders(&mut self, paths: &[String], what: &str) {
        if let Some(action) = self.push(
            ActionKind::Create,
            format!("Create {} placeholder token(s) for {what}", paths.len()),
            paths.to_vec(),
        ) {
            action.validations = NAMING_CHECKS.to_vec();
        }
    }

    fn renames<'s>(&mut self, suggestions: impl IntoIterator<Item = &'s MigrationSuggestion>, what: &str) {
        let (from, to): (Vec<String>, Vec<String>) =
            suggestions.into_iter().map(|s| (s.from.clone(), s.to.clone())).unzip();
        let count = from.len();
        if let Some(action) = self.push(ActionKind::Rename, format!("Rename {count} {what}"), from) {
            action.new_paths = to;
            action.validations = RENAME_CHECKS.to_vec();
        }
    }

    fn restructure(&mut self, paths: &[String]) {
        if let Some(action) = self.push(
            ActionKind::Restructure,
            format!("Rebuild {} compliant path(s) in canonical form", paths.len()),
            paths.to_vec(),
        ) {
            action.validations = RENAME_CHECKS.to_vec();
        }
    }

    fn documentation(&mut self, checks: &[ValidationCheck]) {
        if let Some(action) = self.push(
            ActionKind::UpdateReferences,
            "Backfill descriptions of compliant tokens".to_string(),
            Vec::new(),
        ) {
            action.validations = checks.to_vec();
        }
    }

    fn build(self, effort_hours: u32, previous: Option<&str>) -> MigrationPhase {
        MigrationPhase {
            id: self.id,
            name: self.name.to_string(),
            description: self.description.to_string(),
            actions: self.actions,
            effort_hours,
            dependencies: previous.map(|p| vec![p.to_string()]).unwrap_or_default(),
            rollback_plan: self.rollback_plan.to_string(),
        }
    }
}

fn chain(builders: Vec<PhaseBuilder>, hours: &[u32]) -> Vec<MigrationPhase> {
    let mut phases: Vec<MigrationPhase> = Vec::with_capacity(builders.len());
    for (builder, effort) in builders.into_iter().zip(hours) {
        let previous = phases.last().map(|p| p.id.clone());
        phases.push(builder.build(*effort, previous.as_deref()));
    }
    phases
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn scenario(
    approach: Approach,
    name: &str,
    description: &str,
    risk_score: f64,
    success_probability: f64,
    phases: Vec<MigrationPhase>,
    capacity: TeamCapacity,
) -> MigrationScenario {
    let estimated_effort = phases.iter().map(|p| p.effort_hours).sum();
    MigrationScenario {
        id: ScenarioId::new(),
        approach,
        name: name.to_string(),
        description: description.to_string(),
        risk_score: risk_score.clamp(0.0, 100.0),
        estimated_days: capacity.days_for(estimated_effort),
        estimated_effort,
        success_probability,
        phases,
        benefits: Vec::new(),
        challenges: Vec::new(),
        prerequisites: Vec::new(),
    }
}

fn conservative(findings: &Findings<'_>, base_risk: f64, config: &MigrationConfig) -> MigrationScenario {
    let approach = Approach::Conservative;

    let mut critical = PhaseBuilder::new(approach, 0, "Critical fixes", "Repair broken references")
        .rollback("Delete the created placeholders");
    critical.placeholders(&findings.unresolved, "unresolved references");

    let mut renames = PhaseBuilder::new(
        approach,
        1,
        "Low-risk renames",
        "Rename high-confidence tokens nothing references",
    );
    renames.renames(findings.low_risk.iter().copied(), "unreferenced token(s)");

    let mut docs = PhaseBuilder::new(approach, 2, "Documentation", "Describe the naming scheme in place")
        .rollback("No store changes beyond descriptions");
    docs.documentation(&[]);

    let phases = chain(vec![critical, renames, docs], &CONSERVATIVE_HOURS);
    let mut scenario = scenario(
        approach,
        "Conservative cleanup",
        "Fix critical defects and rename only tokens that are safe to move",
        (base_risk - 30.0).max(10.0),
        0.95,
        phases,
        config.capacities.conservative,
    );
    scenario.benefits = strings(&["Minimal disruption", "Broken references repaired first"]);
    scenario.challenges = strings(&["Most naming debt remains", "Coverage gaps stay open"]);
    scenario.prerequisites = strings(&["Snapshot of the current token set"]);
    scenario
}

fn progressive(findings: &Findings<'_>, base_risk: f64, config: &MigrationConfig) -> MigrationScenario {
    let approach = Approach::Progressive;

    let mut foundation = PhaseBuilder::new(approach, 0, "Foundation", "Repair broken references")
        .rollback("Delete the created placeholders");
    foundation.placeholders(&findings.unresolved, "unresolved references");

    let mut alignment = PhaseBuilder::new(
        approach,
        1,
        "Structural alignment",
        "Move every non-compliant path onto the naming scheme",
    );
    alignment.renames(findings.suggestions, "non-compliant token(s)");
    alignment.restructure(&findings.non_canonical);

    let mut coverage = PhaseBuilder::new(approach, 2, "Coverage gaps", "Fill required context cells")
        .rollback("Delete the created gap tokens");
    coverage.placeholders(&findings.gaps, "coverage gaps");

    let mut validation = PhaseBuilder::new(approach, 3, "Validation", "Verify integrity and document the result")
        .rollback("No store changes beyond descriptions");
    validation.documentation(ValidationCheck::ALL);

    let phases = chain(vec![foundation, alignment, coverage, validation], &PROGRESSIVE_HOURS);
    let mut scenario = scenario(
        approach,
        "Progressive alignment",
        "Align every name with the ontology and close coverage gaps",
        (base_risk - 15.0).max(20.0),
        0.80,
        phases,
        config.capacities.progressive,
    );
    scenario.benefits = strings(&[
        "Consistent naming across the token set",
        "Required context cells covered",
    ]);
    scenario.challenges = strings(&[
        "Consumers must follow renamed paths",
        "Placeholder values need design input",
    ]);
    scenario.prerequisites = strings(&[
        "Snapshot of the current token set",
        "Agreement on the naming ontology",
    ]);
    scenario
}

fn comprehensive(
    findings: &Findings<'_>,
    base_risk: f64,
    floor: f64,
    config: &MigrationConfig,
) -> MigrationScenario {
    let approach = Approach::Comprehensive;

    let mut analysis = PhaseBuilder::new(approach, 0, "Analysis and planning", "Repair broken references")
        .rollback("Delete the created placeholders");
    analysis.placeholders(&findings.unresolved, "unresolved references");

    let mut tooling = PhaseBuilder::new(
        approach,
        1,
        "Tooling infrastructure",
        "Normalise compliant paths so automated checks can run",
    );
    tooling.restructure(&findings.non_canonical);

    let mut restructure = PhaseBuilder::new(
        approach,
        2,
        "Full restructure",
        "Rename every non-compliant token and merge duplicates",
    );
    restructure.renames(findings.suggestions, "non-compliant token(s)");
    let redundant = findings.relocated_redundant();
    for group in &redundant {
        if let Some(action) = restructure.push(
            ActionKind::Merge,
            format!("Merge {} redundant tokens into {}", group.len(), group[0]),
            group.clone(),
        ) {
            action.validations = REFERENCE_CHECKS.to_vec();
        }
    }

    let mut coverage = PhaseBuilder::new(approach, 3, "Full coverage", "Fill every gap and default state")
        .rollback("Delete the created tokens");
    coverage.placeholders(&findings.gaps, "coverage gaps");
    coverage.placeholders(&findings.missing_defaults, "missing default states");

    // Merge members are gone or gained referrers by the time orphans are deleted
    let merged: BTreeSet<&String> = redundant.iter().flatten().collect();
    let orphans: Vec<String> = findings
        .orphans
        .iter()
        .map(|p| findings.relocated(p))
        .filter(|p| !merged.contains(p))
        .collect();
    let mut optimization = PhaseBuilder::new(approach, 4, "Optimization", "Remove orphaned tokens");
    if let Some(action) = optimization.push(
        ActionKind::Delete,
        format!("Delete {} orphaned token(s)", orphans.len()),
        orphans,
    ) {
        action.validations = REFERENCE_CHECKS.to_vec();
    }

    let mut handoff = PhaseBuilder::new(approach, 5, "Handoff documentation", "Document the restructured set")
        .rollback("No store changes beyond descriptions");
    handoff.documentation(ValidationCheck::ALL);

    let phases = chain(
        vec![analysis, tooling, restructure, coverage, optimization, handoff],
        &COMPREHENSIVE_HOURS,
    );
    let mut scenario = scenario(
        approach,
        "Comprehensive restructure",
        "Rebuild the token set on the ontology with full coverage and cleanup",
        (base_risk + 10.0).min(90.0).max(floor),
        0.65,
        phases,
        config.capacities.comprehensive,
    );
    scenario.benefits = strings(&[
        "Fully compliant, fully covered token set",
        "Duplicates and orphans removed",
    ]);
    scenario.challenges = strings(&[
        "Largest consumer impact",
        "Deleted tokens may still be used outside the set",
    ]);
    scenario.prerequisites = strings(&[
        "Snapshot of the current token set",
        "Agreement on the naming ontology",
        "Inventory of downstream consumers",
    ]);
    scenario
}

/// Generate the three scenarios, least to most invasive
///
/// Risk scores never decrease from conservative to comprehensive.
#[must_use]
pub fn generate_scenarios(
    audit: &AuditResult,
    risk: &RiskProfile,
    ontology: &Ontology,
    config: &MigrationConfig,
) -> Vec<MigrationScenario> {
    let findings = Findings::collect(audit, ontology, config);
    let base = risk.overall;

    let conservative = conservative(&findings, base, config);
    let progressive = progressive(&findings, base, config);
    let comprehensive = comprehensive(&findings, base, progressive.risk_score, config);

    tracing::info!(
        base_risk = base,
        suggestions = findings.suggestions.len(),
        unresolved = findings.unresolved.len(),
        gaps = findings.gaps.len(),
        "Generated migration scenarios"
    );

    vec![conservative, progressive, comprehensive]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::assess_risk;
    use semtok_audit::Auditor;
    use semtok_token::MemoryTokenStore;
    use std::sync::Arc;

    fn plan(pairs: &[(&str, &str)]) -> Vec<MigrationScenario> {
        let ontology = Arc::new(Ontology::standard());
        let store = MemoryTokenStore::from_raw(pairs.iter().copied());
        let audit = Auditor::new(Arc::clone(&ontology)).audit(&store);
        let risk = assess_risk(&audit);
        generate_scenarios(&audit, &risk, &ontology, &MigrationConfig::default())
    }

    #[test]
    fn phase_counts_and_effort() {
        let scenarios = plan(&[]);
        let shape: Vec<(Approach, usize, u32)> = scenarios
            .iter()
            .map(|s| (s.approach, s.phases.len(), s.estimated_effort))
            .collect();
        assert_eq!(
            shape,
            vec![
                (Approach::Conservative, 3, 24),
                (Approach::Progressive, 4, 92),
                (Approach::Comprehensive, 6, 196),
            ]
        );
        assert_eq!(scenarios[0].estimated_days, 3);
        assert_eq!(scenarios[2].phases[3].dependencies, vec!["comprehensive-3"]);
        assert!(scenarios[0].phases[0].dependencies.is_empty());
    }

    #[test]
    fn unresolved_targets_become_placeholders() {
        let scenarios = plan(&[("background.action.accent", "{palette.blue.500}")]);
        let critical = &scenarios[0].phases[0];
        assert_eq!(critical.actions.len(), 1);
        assert_eq!(critical.actions[0].kind, ActionKind::Create);
        assert_eq!(critical.actions[0].targets, vec!["palette.blue.500"]);
    }

    #[test]
    fn low_risk_renames_skip_referenced_tokens() {
        let scenarios = plan(&[
            ("bg.action.accent", "#3B82F6"),
            ("fg.action.accent", "#FFFFFF"),
            ("border.action.accent", "{bg.action.accent}"),
        ]);
        let renames = &scenarios[0].phases[1].actions;
        assert_eq!(renames.len(), 1);
        assert_eq!(renames[0].targets, vec!["fg.action.accent"]);
        assert_eq!(renames[0].new_paths, vec!["text.action.accent"]);

        let alignment = &scenarios[1].phases[1].actions[0];
        assert_eq!(alignment.kind, ActionKind::Rename);
        assert_eq!(alignment.targets.len(), 2);
    }

    #[test]
    fn comprehensive_merges_and_creates_defaults() {
        let scenarios = plan(&[
            ("background.action.accent", "#3B82F6"),
            ("background.surface.accent", "#3B82F6"),
            ("text.feedback.danger.hover", "#991B1B"),
        ]);
        let comprehensive = &scenarios[2];
        let merges: Vec<_> = comprehensive.phases[2]
            .actions
            .iter()
            .filter(|a| a.kind == ActionKind::Merge)
            .collect();
        assert_eq!(merges.len(), 1);
        assert_eq!(merges[0].targets[0], "background.action.accent");

        let creates: Vec<&String> = comprehensive.phases[3]
            .actions
            .iter()
            .flat_map(|a| a.targets.iter())
            .collect();
        assert!(creates.iter().any(|p| p.as_str() == "text.feedback.danger"));
    }

    #[test]
    fn risk_ordering_holds_at_zero_base() {
        let ontology = Ontology::standard();
        let audit = Auditor::new(Arc::new(Ontology::standard())).audit(&MemoryTokenStore::new());
        let zero = RiskProfile {
            overall: 0.0,
            naming: 0.0,
            dependency: 0.0,
            coverage: 0.0,
            accessibility: 0.0,
            scale: 0.0,
            level: crate::risk::RiskLevel::Low,
            factors: Vec::new(),
        };
        let scenarios = generate_scenarios(&audit, &zero, &ontology, &MigrationConfig::default());

        assert!((scenarios[0].risk_score - 10.0).abs() < f64::EPSILON);
        assert!((scenarios[1].risk_score - 20.0).abs() < f64::EPSILON);
        assert!((scenarios[2].risk_score - 20.0).abs() < f64::EPSILON);
    }
}
