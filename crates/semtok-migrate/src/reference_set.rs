//! Comparison against a reference token set
//!
//! Normalised-difference and set-overlap metrics over structure, naming
//! compliance, and covered UX contexts.

use semtok_audit::{analyze_coverage, analyze_structure, StructureReport};
use semtok_ontology::{Ontology, UxContext};
use semtok_token::TokenStore;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Similarity of a token set to a reference set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceComparison {
    /// Overall similarity in `[0, 1]`
    pub similarity: f64,
    /// Property class distribution similarity
    pub structure_similarity: f64,
    /// `1 - |compliance difference|`
    pub naming_similarity: f64,
    /// Jaccard overlap of covered contexts
    pub context_overlap: f64,
    /// Compliance rate of the current set
    pub current_compliance: f64,
    /// Compliance rate of the reference set
    pub reference_compliance: f64,
    /// Contexts both sets cover
    pub shared_contexts: Vec<UxContext>,
    /// Contexts only the reference covers
    pub missing_contexts: Vec<UxContext>,
    /// Contexts only the current set covers
    pub extra_contexts: Vec<UxContext>,
    /// Observations
    pub insights: Vec<String>,
    /// Suggested next steps
    pub recommendations: Vec<String>,
}

#[allow(clippy::cast_precision_loss)]
fn distribution(report: &StructureReport) -> BTreeMap<&str, f64> {
    let total = report.compliant_tokens.max(1) as f64;
    report
        .by_property_class
        .iter()
        .map(|(class, count)| (class.as_str(), *count as f64 / total))
        .collect()
}

/// `1 - total variation distance` of the two class distributions
fn structure_similarity(current: &StructureReport, reference: &StructureReport) -> f64 {
    if current.compliant_tokens == 0 && reference.compliant_tokens == 0 {
        return 1.0;
    }
    let a = distribution(current);
    let b = distribution(reference);
    let classes: BTreeSet<&str> = a.keys().chain(b.keys()).copied().collect();
    let distance: f64 = classes
        .iter()
        .map(|c| (a.get(c).copied().unwrap_or(0.0) - b.get(c).copied().unwrap_or(0.0)).abs())
        .sum();
    (1.0 - distance / 2.0).clamp(0.0, 1.0)
}

#[allow(clippy::cast_precision_loss)]
fn jaccard(a: &BTreeSet<UxContext>, b: &BTreeSet<UxContext>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        1.0
    } else {
        a.intersection(b).count() as f64 / union as f64
    }
}

/// Compare `current` against `reference`
#[must_use]
pub fn compare_with_reference(
    ontology: &Ontology,
    current: &dyn TokenStore,
    reference: &dyn TokenStore,
) -> ReferenceComparison {
    let current_structure = analyze_structure(ontology, current);
    let reference_structure = analyze_structure(ontology, reference);

    let current_contexts: BTreeSet<UxContext> =
        analyze_coverage(ontology, current).covered_contexts().into_iter().collect();
    let reference_contexts: BTreeSet<UxContext> =
        analyze_coverage(ontology, reference).covered_contexts().into_iter().collect();

    let structure_similarity = structure_similarity(&current_structure, &reference_structure);
    let naming_similarity =
        1.0 - (current_structure.compliance_rate - reference_structure.compliance_rate).abs();
    let context_overlap = jaccard(&current_contexts, &reference_contexts);
    let similarity = (structure_similarity + naming_similarity + context_overlap) / 3.0;

    let shared_contexts: Vec<UxContext> =
        current_contexts.intersection(&reference_contexts).copied().collect();
    let missing_contexts: Vec<UxContext> =
        reference_contexts.difference(&current_contexts).copied().collect();
    let extra_contexts: Vec<UxContext> =
        current_contexts.difference(&reference_contexts).copied().collect();

    let mut insights = vec![format!(
        "{} of {} tokens are compliant against {} of {} in the reference",
        current_structure.compliant_tokens,
        current_structure.total_tokens,
        reference_structure.compliant_tokens,
        reference_structure.total_tokens
    )];
    let mut recommendations = Vec::new();

    let gap = reference_structure.compliance_rate - current_structure.compliance_rate;
    if gap > 0.0 {
        insights.push(format!("Naming compliance trails the reference by {:.0}%", gap * 100.0));
        recommendations.push("Apply the suggested renames to close the naming gap".to_string());
    }
    if structure_similarity < 0.5 {
        insights.push("Property class mix differs substantially from the reference".to_string());
        recommendations.push("Review which property classes the reference relies on".to_string());
    }
    if !missing_contexts.is_empty() {
        let names: Vec<&str> = missing_contexts.iter().map(|c| c.as_str()).collect();
        insights.push(format!("Reference covers contexts this set lacks: {}", names.join(", ")));
        recommendations.push(format!("Add tokens for {}", names.join(", ")));
    }
    if !extra_contexts.is_empty() {
        let names: Vec<&str> = extra_contexts.iter().map(|c| c.as_str()).collect();
        insights.push(format!("Only this set covers: {}", names.join(", ")));
    }

    ReferenceComparison {
        similarity,
        structure_similarity,
        naming_similarity,
        context_overlap,
        current_compliance: current_structure.compliance_rate,
        reference_compliance: reference_structure.compliance_rate,
        shared_contexts,
        missing_contexts,
        extra_contexts,
        insights,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semtok_token::MemoryTokenStore;

    #[test]
    fn identical_sets_are_fully_similar() {
        let store = MemoryTokenStore::from_raw([
            ("background.action.accent", "#3B82F6"),
            ("text.action.accent", "#FFFFFF"),
        ]);
        let comparison = compare_with_reference(&Ontology::standard(), &store, &store.clone());
        assert!((comparison.similarity - 1.0).abs() < 1e-9);
        assert!(comparison.recommendations.is_empty());
        assert_eq!(comparison.shared_contexts, vec![UxContext::Action]);
    }

    #[test]
    fn missing_contexts_and_naming_gap() {
        let current = MemoryTokenStore::from_raw([
            ("background.action.accent", "#3B82F6"),
            ("bg.card", "#FFFFFF"),
        ]);
        let reference = MemoryTokenStore::from_raw([
            ("background.action.accent", "#3B82F6"),
            ("background.surface.base", "#FFFFFF"),
        ]);
        let comparison = compare_with_reference(&Ontology::standard(), &current, &reference);

        assert!((comparison.naming_similarity - 0.5).abs() < 1e-9);
        assert_eq!(comparison.missing_contexts, vec![UxContext::Surface]);
        assert!((comparison.context_overlap - 0.5).abs() < 1e-9);
        // Both sets are all background tokens
        assert!((comparison.structure_similarity - 1.0).abs() < 1e-9);
        assert_eq!(comparison.recommendations.len(), 2);
    }

    #[test]
    fn empty_sets_match() {
        let empty = MemoryTokenStore::new();
        let comparison = compare_with_reference(&Ontology::standard(), &empty, &MemoryTokenStore::new());
        assert!((comparison.similarity - 1.0).abs() < 1e-9);
    }
}
