//! Post-action validation checks

use crate::plan::ValidationCheck;
use semtok_graph::{DependencyGraph, IssueKind, Severity};
use semtok_ontology::Ontology;
use semtok_token::TokenStore;
use serde::{Deserialize, Serialize};

/// Outcome of one check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Check that ran
    pub check: ValidationCheck,
    /// Whether it passed
    pub passed: bool,
    /// Severity of a failure
    pub severity: Severity,
    /// Human-readable outcome
    pub message: String,
    /// Offending paths
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,
}

impl ValidationResult {
    fn outcome(check: ValidationCheck, severity: Severity, paths: Vec<String>) -> Self {
        let passed = paths.is_empty();
        let message = if passed {
            format!("{check}: passed")
        } else {
            format!("{check}: {} offending path(s)", paths.len())
        };
        Self {
            check,
            passed,
            severity: if passed { Severity::Info } else { severity },
            message,
            paths,
        }
    }
}

/// Run `checks` against the store
///
/// Naming compliance only inspects `touched`, the paths the action wrote or,
/// in a dry run, would have written.
#[must_use]
pub fn run_checks(
    checks: &[ValidationCheck],
    ontology: &Ontology,
    store: &dyn TokenStore,
    touched: &[String],
) -> Vec<ValidationResult> {
    if checks.is_empty() {
        return Vec::new();
    }
    let graph = checks
        .iter()
        .any(|c| *c != ValidationCheck::NamingConventionCompliance)
        .then(|| DependencyGraph::build(store));

    checks
        .iter()
        .map(|check| {
            let (severity, paths) = match check {
                ValidationCheck::NoCircularDependencies => (
                    Severity::Error,
                    graph
                        .iter()
                        .flat_map(|g| g.issues_of(IssueKind::Circular))
                        .flat_map(|i| i.paths.iter().cloned())
                        .collect(),
                ),
                ValidationCheck::NoBrokenReferences => (
                    Severity::Error,
                    graph
                        .iter()
                        .flat_map(|g| g.issues_of(IssueKind::Unresolved))
                        .flat_map(|i| i.paths.iter().cloned())
                        .collect(),
                ),
                ValidationCheck::NamingConventionCompliance => (
                    Severity::Warning,
                    touched
                        .iter()
                        .filter(|p| ontology.parse_strict(p).is_none())
                        .cloned()
                        .collect(),
                ),
            };
            ValidationResult::outcome(*check, severity, paths)
        })
        .collect()
}
