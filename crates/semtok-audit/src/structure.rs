//! Structural analyzer
//!
//! Naming compliance rate plus per-axis histograms of compliant tokens.

use semtok_ontology::Ontology;
use semtok_token::TokenStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Naming compliance summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureReport {
    /// Number of tokens
    pub total_tokens: usize,
    /// Tokens whose path parses strictly
    pub compliant_tokens: usize,
    /// Paths that do not parse strictly
    pub non_compliant: Vec<String>,
    /// `compliant / total`, `1.0` for an empty store
    pub compliance_rate: f64,
    /// Compliant tokens per property class
    pub by_property_class: BTreeMap<String, usize>,
    /// Compliant tokens per UX context (`none` when absent)
    pub by_context: BTreeMap<String, usize>,
    /// Compliant tokens per intent
    pub by_intent: BTreeMap<String, usize>,
    /// Compliant tokens per interaction state
    pub by_state: BTreeMap<String, usize>,
}

/// Run the structural analysis
#[must_use]
pub fn analyze_structure(ontology: &Ontology, store: &dyn TokenStore) -> StructureReport {
    let mut report = StructureReport {
        total_tokens: store.len(),
        ..StructureReport::default()
    };

    for token in store.iter() {
        let Some(name) = ontology.parse_strict(&token.path) else {
            report.non_compliant.push(token.path.clone());
            continue;
        };

        report.compliant_tokens += 1;
        *report
            .by_property_class
            .entry(name.property_class.to_string())
            .or_default() += 1;
        *report
            .by_context
            .entry(name.ux_context.map_or_else(|| "none".to_string(), |c| c.to_string()))
            .or_default() += 1;
        *report.by_intent.entry(name.intent.to_string()).or_default() += 1;
        *report
            .by_state
            .entry(name.effective_state().to_string())
            .or_default() += 1;
    }

    report.compliance_rate = ratio(report.compliant_tokens, report.total_tokens);
    report
}

/// `part / whole`, `1.0` when `whole` is zero
#[allow(clippy::cast_precision_loss)]
pub(crate) fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        1.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semtok_token::MemoryTokenStore;

    #[test]
    fn compliance_and_histograms() {
        let store = MemoryTokenStore::from_raw([
            ("background.action.accent", "#3B82F6"),
            ("background.action.accent.hover", "#2563EB"),
            ("text.accent", "#FFFFFF"),
            ("color.blue.500", "#3B82F6"),
        ]);
        let report = analyze_structure(&Ontology::standard(), &store);

        assert_eq!(report.compliant_tokens, 3);
        assert_eq!(report.non_compliant, vec!["color.blue.500"]);
        assert!((report.compliance_rate - 0.75).abs() < 1e-9);
        assert_eq!(report.by_property_class["background"], 2);
        assert_eq!(report.by_context["none"], 1);
        assert_eq!(report.by_state["hover"], 1);
        assert_eq!(report.by_state["default"], 2);
    }

    #[test]
    fn empty_store_is_fully_compliant() {
        let report = analyze_structure(&Ontology::standard(), &MemoryTokenStore::new());
        assert!((report.compliance_rate - 1.0).abs() < f64::EPSILON);
    }
}
