//! Scoping analyzer
//!
//! Checks that compliant tokens stay inside the surface their name claims:
//! value kind matches the property class, the class belongs to the UX
//! context, and semantic references stay within one context.

use semtok_graph::Severity;
use semtok_ontology::{Ontology, PropertyClass};
use semtok_token::{reference, resolve_value, TokenKind, TokenStore};
use serde::{Deserialize, Serialize};

/// Kind of scoping violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopingIssueKind {
    /// Value kind contradicts the property class
    ValueKindMismatch,
    /// Property class is not part of the context surface
    ClassOutsideContext,
    /// Semantic token references another context's semantic token
    CrossContextReference,
}

/// One scoping violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopingIssue {
    /// Severity
    pub severity: Severity,
    /// Violation kind
    #[serde(rename = "type")]
    pub kind: ScopingIssueKind,
    /// Offending token
    pub path: String,
    /// Human-readable message
    pub message: String,
}

/// Scoping findings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopingReport {
    /// All violations
    pub issues: Vec<ScopingIssue>,
    /// Error count
    pub errors: usize,
    /// Warning count
    pub warnings: usize,
}

fn kind_contradicts(class: PropertyClass, kind: TokenKind) -> bool {
    if class.is_dimension() {
        kind == TokenKind::Color
    } else {
        matches!(kind, TokenKind::Dimension | TokenKind::Number)
    }
}

/// Run the scoping analysis over compliant tokens
#[must_use]
pub fn analyze_scoping(ontology: &Ontology, store: &dyn TokenStore) -> ScopingReport {
    let mut issues = Vec::new();

    for token in store.iter() {
        let Some(name) = ontology.parse_strict(&token.path) else {
            continue;
        };

        if let Some(value) = resolve_value(store, &token.path) {
            let kind = token.token_type.unwrap_or_else(|| value.kind());
            if kind_contradicts(name.property_class, kind) {
                issues.push(ScopingIssue {
                    severity: Severity::Error,
                    kind: ScopingIssueKind::ValueKindMismatch,
                    path: token.path.clone(),
                    message: format!(
                        "{} is a {} token but holds a {} value",
                        token.path, name.property_class, kind
                    ),
                });
            }
        }

        let Some(context) = name.ux_context else {
            continue;
        };

        if !ontology.context_allows(context, name.property_class) {
            issues.push(ScopingIssue {
                severity: Severity::Warning,
                kind: ScopingIssueKind::ClassOutsideContext,
                path: token.path.clone(),
                message: format!(
                    "{} is not part of the {} context surface",
                    name.property_class, context
                ),
            });
        }

        let Some(text) = token.value.as_text() else {
            continue;
        };
        for target in reference::extract_references(&token.path, text, |p| store.contains(p)) {
            let target_context = ontology.parse_strict(&target).and_then(|n| n.ux_context);
            if let Some(other) = target_context.filter(|other| *other != context) {
                issues.push(ScopingIssue {
                    severity: Severity::Warning,
                    kind: ScopingIssueKind::CrossContextReference,
                    path: token.path.clone(),
                    message: format!(
                        "{} ({context}) references {target} ({other})",
                        token.path
                    ),
                });
            }
        }
    }

    let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
    let warnings = issues.iter().filter(|i| i.severity == Severity::Warning).count();
    ScopingReport {
        issues,
        errors,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semtok_token::MemoryTokenStore;

    fn run(pairs: &[(&str, &str)]) -> ScopingReport {
        let store = MemoryTokenStore::from_raw(pairs.iter().copied());
        analyze_scoping(&Ontology::standard(), &store)
    }

    #[test]
    fn dimension_in_color_class_is_error() {
        let report = run(&[("background.action.accent", "16px")]);
        assert_eq!(report.errors, 1);
        assert_eq!(report.issues[0].kind, ScopingIssueKind::ValueKindMismatch);
    }

    #[test]
    fn color_in_spacing_class_is_error() {
        let report = run(&[("spacing-inline.action.base", "#ffffff")]);
        assert_eq!(report.errors, 1);
    }

    #[test]
    fn class_outside_context_warns() {
        let report = run(&[("shadow.input.base", "0 1px 2px rgba(0,0,0,0.1)")]);
        assert_eq!(report.warnings, 1);
        assert_eq!(report.issues[0].kind, ScopingIssueKind::ClassOutsideContext);
    }

    #[test]
    fn cross_context_reference_warns() {
        let report = run(&[
            ("background.surface.base", "#ffffff"),
            ("background.action.base", "{background.surface.base}"),
        ]);
        assert_eq!(report.warnings, 1);
        assert_eq!(report.issues[0].kind, ScopingIssueKind::CrossContextReference);
    }

    #[test]
    fn clean_tokens_pass() {
        let report = run(&[
            ("color.blue.500", "#3B82F6"),
            ("background.action.accent", "{color.blue.500}"),
            ("spacing-inline.action.base", "12px"),
        ]);
        assert_eq!(report, ScopingReport::default());
    }
}
