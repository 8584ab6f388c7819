//! Migration suggestions
//!
//! Lenient parses of non-compliant paths, ranked by confidence.

use semtok_ontology::{AliasUse, Ontology};
use semtok_token::TokenStore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Proposed rename of one non-compliant token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationSuggestion {
    /// Current path
    pub from: String,
    /// Canonical path inferred by the lenient parser
    pub to: String,
    /// Parser confidence
    pub confidence: f64,
    /// Aliases the parser applied
    pub aliases: Vec<AliasUse>,
    /// Namespace segments dropped
    pub skipped_prefix: Vec<String>,
    /// Segments the parser could not place
    pub unrecognized: Vec<String>,
    /// Human-readable rationale
    pub reason: String,
}

/// Infer suggestions for every non-compliant path
///
/// Targets that already exist, or that a higher-ranked suggestion claims,
/// are skipped so every suggestion can be applied independently.
#[must_use]
pub fn suggest_migrations(
    ontology: &Ontology,
    store: &dyn TokenStore,
    min_confidence: f64,
) -> Vec<MigrationSuggestion> {
    let mut candidates: Vec<MigrationSuggestion> = store
        .iter()
        .filter(|token| ontology.parse_strict(&token.path).is_none())
        .filter_map(|token| {
            let parse = ontology.parse_lenient(&token.path)?;
            if parse.confidence < min_confidence {
                return None;
            }
            let to = parse.suggested_path();
            let inferred = format!("Inferred {} from {}", parse.name.property_class, token.path);
            let reason = if parse.aliases.is_empty() {
                inferred
            } else {
                let applied: Vec<String> = parse
                    .aliases
                    .iter()
                    .map(|a| format!("{}→{}", a.alias, a.canonical))
                    .collect();
                format!("{inferred} via {}", applied.join(", "))
            };
            Some(MigrationSuggestion {
                from: token.path.clone(),
                to,
                confidence: parse.confidence,
                aliases: parse.aliases,
                skipped_prefix: parse.skipped_prefix,
                unrecognized: parse.unrecognized,
                reason,
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.from.cmp(&b.from))
    });

    let mut claimed: HashSet<String> = HashSet::new();
    candidates
        .into_iter()
        .filter(|s| s.to != s.from && !store.contains(&s.to) && claimed.insert(s.to.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use semtok_token::MemoryTokenStore;

    #[test]
    fn ranks_by_confidence() {
        let store = MemoryTokenStore::from_raw([
            ("ds.core.bg.button.primary", "#000"),
            ("bg.action.accent", "#000"),
        ]);
        let suggestions = suggest_migrations(&Ontology::standard(), &store, 0.3);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].from, "bg.action.accent");
        assert_eq!(suggestions[0].to, "background.action.accent");
    }

    #[test]
    fn skips_existing_targets_and_low_confidence() {
        let store = MemoryTokenStore::from_raw([
            ("background.action.accent", "#000"),
            ("bg.action.accent", "#000"),
            ("fg.muted", "#111"),
        ]);
        let suggestions = suggest_migrations(&Ontology::standard(), &store, 0.95);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn ignores_compliant_and_signal_free_paths() {
        let store = MemoryTokenStore::from_raw([("text.base", "#000"), ("blue.500", "#00f")]);
        assert!(suggest_migrations(&Ontology::standard(), &store, 0.3).is_empty());
    }
}
