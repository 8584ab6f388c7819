//! Anti-pattern detectors
//!
//! Five independent heuristics over the parsed token set: primitive
//! leakage, naming inconsistency, redundant tokens, semantic drift, and
//! missing variants.

use crate::config::AuditConfig;
use crate::parsed::ParsedToken;
use semtok_graph::Severity;
use semtok_ontology::InteractionState;
use semtok_token::{parse_hex, resolve_value, TokenStore};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Anti-pattern kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AntiPatternKind {
    /// Semantic token hard-codes a literal color
    PrimitiveLeakage,
    /// One property class mixes path separators
    NamingInconsistency,
    /// Same class, intent, and value defined more than once
    RedundantTokens,
    /// Same intent keyword, diverging colors
    SemanticDrift,
    /// Hover variant without a default
    MissingVariant,
}

/// One anti-pattern occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntiPattern {
    /// Pattern kind
    #[serde(rename = "type")]
    pub kind: AntiPatternKind,
    /// Severity
    pub severity: Severity,
    /// Paths involved
    pub paths: Vec<String>,
    /// Human-readable message
    pub message: String,
    /// Suggested remedy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Anti-pattern findings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntiPatternReport {
    /// All occurrences
    pub patterns: Vec<AntiPattern>,
    /// Error count
    pub errors: usize,
    /// Warning count
    pub warnings: usize,
}

impl AntiPatternReport {
    /// Occurrences of one kind
    pub fn of_kind(&self, kind: AntiPatternKind) -> impl Iterator<Item = &AntiPattern> + '_ {
        self.patterns.iter().filter(move |p| p.kind == kind)
    }
}

/// Run every detector
pub(crate) fn detect_anti_patterns(
    parsed: &[ParsedToken<'_>],
    store: &dyn TokenStore,
    config: &AuditConfig,
) -> AntiPatternReport {
    let mut patterns = Vec::new();
    primitive_leakage(parsed, &mut patterns);
    naming_inconsistency(parsed, &mut patterns);
    redundant_tokens(parsed, store, &mut patterns);
    semantic_drift(store, config, &mut patterns);
    missing_variants(parsed, &mut patterns);

    let errors = patterns.iter().filter(|p| p.severity == Severity::Error).count();
    let warnings = patterns.iter().filter(|p| p.severity == Severity::Warning).count();
    AntiPatternReport {
        patterns,
        errors,
        warnings,
    }
}

fn primitive_leakage(parsed: &[ParsedToken<'_>], out: &mut Vec<AntiPattern>) {
    for entry in parsed.iter().filter(|p| p.compliant) {
        let Some(text) = entry.token.value.as_text() else {
            continue;
        };
        if entry.token.has_reference_syntax() || parse_hex(text.trim()).is_none() {
            continue;
        }
        out.push(AntiPattern {
            kind: AntiPatternKind::PrimitiveLeakage,
            severity: Severity::Warning,
            paths: vec![entry.token.path.clone()],
            message: format!(
                "{} hard-codes {} instead of referencing a primitive",
                entry.token.path,
                text.trim()
            ),
            suggestion: Some("Reference a palette token such as {color.blue.500}".to_string()),
        });
    }
}

fn separator_style(path: &str) -> String {
    ['.', '/', '_']
        .iter()
        .filter(|sep| path.contains(**sep))
        .collect()
}

fn naming_inconsistency(parsed: &[ParsedToken<'_>], out: &mut Vec<AntiPattern>) {
    let mut by_class: BTreeMap<&str, Vec<&ParsedToken<'_>>> = BTreeMap::new();
    for entry in parsed {
        by_class
            .entry(entry.name.property_class.as_str())
            .or_default()
            .push(entry);
    }

    for (class, entries) in by_class {
        let styles: BTreeSet<String> = entries
            .iter()
            .map(|e| separator_style(&e.token.path))
            .filter(|s| !s.is_empty())
            .collect();
        if styles.len() < 2 {
            continue;
        }
        let rendered: Vec<String> = styles.iter().map(|s| format!("'{s}'")).collect();
        out.push(AntiPattern {
            kind: AntiPatternKind::NamingInconsistency,
            severity: Severity::Warning,
            paths: entries.iter().map(|e| e.token.path.clone()).collect(),
            message: format!(
                "{class} tokens mix separator styles {}",
                rendered.join(", ")
            ),
            suggestion: Some("Use '.' between every path segment".to_string()),
        });
    }
}

fn redundant_tokens(parsed: &[ParsedToken<'_>], store: &dyn TokenStore, out: &mut Vec<AntiPattern>) {
    let mut groups: BTreeMap<(String, String, String), Vec<String>> = BTreeMap::new();
    for entry in parsed {
        let Some(value) = resolve_value(store, &entry.token.path) else {
            continue;
        };
        let value_key = value.hex_color().unwrap_or_else(|| value.to_string());
        groups
            .entry((
                entry.name.property_class.to_string(),
                entry.name.intent.to_string(),
                value_key,
            ))
            .or_default()
            .push(entry.token.path.clone());
    }

    for ((class, intent, value), paths) in groups {
        if paths.len() < 2 {
            continue;
        }
        out.push(AntiPattern {
            kind: AntiPatternKind::RedundantTokens,
            severity: Severity::Warning,
            message: format!(
                "{} {class}/{intent} tokens share the value {value}",
                paths.len()
            ),
            suggestion: Some(format!("Merge into {}", paths[0])),
            paths,
        });
    }
}

fn semantic_drift(store: &dyn TokenStore, config: &AuditConfig, out: &mut Vec<AntiPattern>) {
    for keyword in &config.drift_keywords {
        let needle = keyword.to_ascii_lowercase();
        let mut members: Vec<(String, u8)> = Vec::new();
        for token in store.iter() {
            if !token.path.to_ascii_lowercase().contains(&needle) {
                continue;
            }
            let red = resolve_value(store, &token.path)
                .and_then(|v| v.hex_color())
                .and_then(|hex| parse_hex(&hex))
                .map(|[r, _, _]| r);
            if let Some(red) = red {
                members.push((token.path.clone(), red));
            }
        }

        let (Some(min), Some(max)) = (
            members.iter().map(|(_, r)| *r).min(),
            members.iter().map(|(_, r)| *r).max(),
        ) else {
            continue;
        };
        if max - min <= config.drift_red_threshold {
            continue;
        }
        out.push(AntiPattern {
            kind: AntiPatternKind::SemanticDrift,
            severity: Severity::Warning,
            message: format!(
                "'{keyword}' colors diverge by {} in the red channel",
                max - min
            ),
            suggestion: Some(format!("Point every '{keyword}' token at one palette color")),
            paths: members.into_iter().map(|(path, _)| path).collect(),
        });
    }
}

fn missing_variants(parsed: &[ParsedToken<'_>], out: &mut Vec<AntiPattern>) {
    let mut groups: BTreeMap<String, (BTreeSet<InteractionState>, Vec<String>)> = BTreeMap::new();
    for entry in parsed {
        let mut base = entry.name.clone();
        base.state = None;
        let group = groups.entry(base.build_path()).or_default();
        group.0.insert(entry.name.effective_state());
        group.1.push(entry.token.path.clone());
    }

    for (base, (states, paths)) in groups {
        if states.len() == 1 && states.contains(&InteractionState::Hover) {
            out.push(AntiPattern {
                kind: AntiPatternKind::MissingVariant,
                severity: Severity::Error,
                paths,
                message: format!("{base} defines a hover state but no default"),
                suggestion: Some(format!("Create {base}")),
            });
        }
    }
}
