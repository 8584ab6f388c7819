//! Testing utilities for the Semtok workspace
//!
//! Shared token fixtures, store comparison helpers, and proptest strategies.

#![allow(missing_docs)]
#![allow(unreachable_pub)]

use semtok_token::{MemoryTokenStore, TokenStore};

/// Accent button pair: blue background with white text
pub fn accent_pair_store() -> MemoryTokenStore {
    MemoryTokenStore::from_raw([
        ("background.action.accent", "#3B82F6"),
        ("text.action.accent", "#FFFFFF"),
    ])
}

/// Primitive palette plus compliant semantic tokens covering every required cell
pub fn healthy_store() -> MemoryTokenStore {
    MemoryTokenStore::from_raw([
        ("palette.gray.50", "#F9FAFB"),
        ("palette.gray.100", "#F3F4F6"),
        ("palette.gray.200", "#E5E7EB"),
        ("palette.gray.300", "#D1D5DB"),
        ("palette.gray.400", "#9CA3AF"),
        ("palette.gray.700", "#374151"),
        ("palette.gray.800", "#1F2937"),
        ("palette.gray.900", "#111827"),
        ("palette.white", "#FFFFFF"),
        ("palette.blue.50", "#EFF6FF"),
        ("palette.blue.600", "#2563EB"),
        ("palette.blue.700", "#1D4ED8"),
        ("palette.blue.900", "#1E3A8A"),
        ("palette.depth.sm", "0 1px 2px rgba(0, 0, 0, 0.1)"),
        ("background.action.base", "{palette.gray.900}"),
        ("text.action.base", "{palette.white}"),
        ("border.action.base", "{palette.blue.900}"),
        ("background.input.base", "{palette.white}"),
        ("text.input.base", "{palette.gray.900}"),
        ("border.input.base", "{palette.gray.300}"),
        ("outline.input.base", "{palette.blue.600}"),
        ("background.surface.base", "{palette.gray.100}"),
        ("border.surface.base", "{palette.gray.200}"),
        ("shadow.surface.base", "{palette.depth.sm}"),
        ("background.feedback.base", "{palette.blue.50}"),
        ("text.feedback.base", "{palette.blue.900}"),
        ("icon.feedback.base", "{palette.blue.700}"),
        ("background.navigation.base", "{palette.gray.800}"),
        ("text.navigation.base", "{palette.gray.50}"),
        ("text.data.base", "{palette.gray.700}"),
        ("border.data.base", "{palette.gray.400}"),
    ])
}

/// Pre-ontology naming with aliases, prefixes, and one broken reference
pub fn legacy_store() -> MemoryTokenStore {
    MemoryTokenStore::from_raw([
        ("color.blue.500", "#3B82F6"),
        ("color.blue.600", "#2563EB"),
        ("color.red.600", "#DC2626"),
        ("bg.button.primary", "{color.blue.500}"),
        ("ds.color.button.primary.hovered", "{color.blue.600}"),
        ("fg.button.primary", "#FFFFFF"),
        ("bg.alert.error", "{color.red.600}"),
        ("text.feedback.danger", "#FFFFFF"),
        ("border.input.base", "{color.gray.300}"),
        ("card.shadow", "0 1px 2px rgba(0, 0, 0, 0.1)"),
    ])
}

/// Two tokens referencing each other
pub fn cycle_store() -> MemoryTokenStore {
    MemoryTokenStore::from_raw([("a", "{b}"), ("b", "{a}")])
}

/// Observable content of a store: `(path, raw value)` in iteration order
pub fn store_pairs(store: &dyn TokenStore) -> Vec<(String, String)> {
    store
        .iter()
        .map(|token| (token.path.clone(), token.raw_text()))
        .collect()
}

/// Observable content sorted by path
pub fn sorted_pairs(store: &dyn TokenStore) -> Vec<(String, String)> {
    let mut pairs = store_pairs(store);
    pairs.sort();
    pairs
}

/// Paths whose raw value mentions `{target}`
pub fn referrers_of(store: &dyn TokenStore, target: &str) -> Vec<String> {
    let needle = format!("{{{target}}}");
    store
        .iter()
        .filter(|token| token.raw_text().contains(&needle))
        .map(|token| token.path.clone())
        .collect()
}

pub mod strategies {
    //! Proptest strategies over token stores

    use proptest::prelude::*;
    use semtok_token::MemoryTokenStore;

    /// Dotted path of two to four lowercase segments
    pub fn arb_path() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z]{1,6}", 2..=4).prop_map(|segments| segments.join("."))
    }

    /// Literal hex color, dimension, or reference to an arbitrary path
    pub fn arb_raw_value() -> impl Strategy<Value = String> {
        prop_oneof![
            "#[0-9a-f]{6}",
            (1u32..64).prop_map(|n| format!("{n}px")),
            arb_path().prop_map(|p| format!("{{{p}}}")),
        ]
    }

    /// Store of up to `max` tokens
    pub fn arb_store(max: usize) -> impl Strategy<Value = MemoryTokenStore> {
        prop::collection::btree_map(arb_path(), arb_raw_value(), 0..=max).prop_map(|entries| {
            MemoryTokenStore::from_raw(entries.iter().map(|(p, v)| (p.as_str(), v.as_str())))
        })
    }
}
