//! Coverage analyzer
//!
//! Fills the full (UX context x property class) matrix from compliant
//! tokens and scores how many required cells are present.

use crate::structure::ratio;
use semtok_ontology::{Intent, Ontology, PropertyClass, SemanticTokenName, UxContext};
use semtok_token::TokenStore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One cell of the coverage matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageCell {
    /// UX context
    pub context: UxContext,
    /// Property class
    pub property_class: PropertyClass,
    /// Declared required by the context
    pub required: bool,
    /// At least one compliant token falls in this cell
    pub present: bool,
}

/// Required cell with no token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageGap {
    /// UX context
    pub context: UxContext,
    /// Missing property class
    pub property_class: PropertyClass,
    /// Canonical path that would fill the gap
    pub suggested_path: String,
}

/// Coverage of one UX context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextCoverage {
    /// UX context
    pub context: UxContext,
    /// Required classes
    pub required: usize,
    /// Required classes present
    pub present: usize,
    /// `present / required`
    pub score: f64,
}

/// Coverage findings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    /// Full matrix, context-major
    pub cells: Vec<CoverageCell>,
    /// Per-context scores
    pub contexts: Vec<ContextCoverage>,
    /// Required cells without tokens
    pub gaps: Vec<CoverageGap>,
    /// Required cells in the matrix
    pub required_total: usize,
    /// Required cells that are present
    pub required_present: usize,
    /// `required_present / required_total`
    pub score: f64,
}

impl CoverageReport {
    /// Cell for one (context, class) pair
    #[must_use]
    pub fn cell(&self, context: UxContext, class: PropertyClass) -> Option<&CoverageCell> {
        self.cells
            .iter()
            .find(|c| c.context == context && c.property_class == class)
    }

    /// Coverage of one context
    #[must_use]
    pub fn context(&self, context: UxContext) -> Option<&ContextCoverage> {
        self.contexts.iter().find(|c| c.context == context)
    }

    /// Contexts with at least one present cell
    #[must_use]
    pub fn covered_contexts(&self) -> Vec<UxContext> {
        let mut covered: Vec<UxContext> = self
            .cells
            .iter()
            .filter(|c| c.present)
            .map(|c| c.context)
            .collect();
        covered.dedup();
        covered
    }
}

/// Run the coverage analysis
#[must_use]
pub fn analyze_coverage(ontology: &Ontology, store: &dyn TokenStore) -> CoverageReport {
    let present: HashSet<(UxContext, PropertyClass)> = store
        .iter()
        .filter_map(|token| ontology.parse_strict(&token.path))
        .filter_map(|name| name.ux_context.map(|ctx| (ctx, name.property_class)))
        .collect();

    let mut report = CoverageReport::default();

    for entry in ontology.contexts() {
        let mut context_present = 0;
        for class in PropertyClass::ALL {
            let required = entry.required_classes.contains(class);
            let is_present = present.contains(&(entry.id, *class));

            if required {
                report.required_total += 1;
                if is_present {
                    report.required_present += 1;
                    context_present += 1;
                } else {
                    report.gaps.push(CoverageGap {
                        context: entry.id,
                        property_class: *class,
                        suggested_path: SemanticTokenName::new(*class, Intent::Base)
                            .with_context(entry.id)
                            .build_path(),
                    });
                }
            }

            report.cells.push(CoverageCell {
                context: entry.id,
                property_class: *class,
                required,
                present: is_present,
            });
        }

        report.contexts.push(ContextCoverage {
            context: entry.id,
            required: entry.required_classes.len(),
            present: context_present,
            score: ratio(context_present, entry.required_classes.len()),
        });
    }

    report.score = ratio(report.required_present, report.required_total);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use semtok_token::MemoryTokenStore;

    #[test]
    fn matrix_is_full_cross_product() {
        let report = analyze_coverage(&Ontology::standard(), &MemoryTokenStore::new());
        assert_eq!(report.cells.len(), UxContext::ALL.len() * PropertyClass::ALL.len());
        assert_eq!(report.gaps.len(), report.required_total);
        assert!(report.score.abs() < f64::EPSILON);
    }

    #[test]
    fn gaps_suggest_base_paths() {
        let store = MemoryTokenStore::from_raw([("background.navigation.base", "#ffffff")]);
        let report = analyze_coverage(&Ontology::standard(), &store);

        let gap = report
            .gaps
            .iter()
            .find(|g| g.context == UxContext::Navigation)
            .unwrap();
        assert_eq!(gap.suggested_path, "text.navigation.base");
    }

    #[test]
    fn non_required_cells_still_recorded() {
        let store = MemoryTokenStore::from_raw([("radius.action.base", "4px")]);
        let report = analyze_coverage(&Ontology::standard(), &store);
        let cell = report.cell(UxContext::Action, PropertyClass::Radius).unwrap();
        assert!(cell.present);
        assert!(!cell.required);
        assert_eq!(report.covered_contexts(), vec![UxContext::Action]);
    }
}
