//! Embedded reference grammar
//!
//! A token value references another token in one of three forms:
//! - pure reference: `"{color.blue.500}"`
//! - bare path: the whole value equals an existing token path
//! - embedded: `"1px solid {border.action.base}"`
//!
//! One compiled pattern backs extraction, matching, and rewriting so the
//! dependency graph and the migration rewriter always agree.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static REFERENCE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]+)\}").expect("reference pattern is valid"));

/// Iterate over every `{path}` reference embedded in `text`
pub fn embedded_references(text: &str) -> impl Iterator<Item = &str> + '_ {
    REFERENCE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|path| !path.is_empty())
}

/// Whether `text` contains at least one `{path}` reference
#[inline]
#[must_use]
pub fn has_embedded_reference(text: &str) -> bool {
    embedded_references(text).next().is_some()
}

/// Whether `text` is exactly one `{path}` reference and nothing else
#[must_use]
pub fn pure_reference(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    let caps = REFERENCE_PATTERN.captures(trimmed)?;
    let whole = caps.get(0)?;
    if whole.start() == 0 && whole.end() == trimmed.len() {
        caps.get(1).map(|m| m.as_str().trim())
    } else {
        None
    }
}

/// Extract reference targets from the value of the token at `owner`
///
/// Embedded references are returned in order of appearance, deduplicated.
/// When no braces are present, the bare-path form is recognized only if
/// `exists` reports the trimmed value as a path other than `owner`.
pub fn extract_references<F>(owner: &str, text: &str, exists: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let mut targets: Vec<String> = Vec::new();
    for path in embedded_references(text) {
        if !targets.iter().any(|t| t == path) {
            targets.push(path.to_string());
        }
    }

    if targets.is_empty() {
        let bare = text.trim();
        if !bare.is_empty() && bare != owner && !bare.contains(char::is_whitespace) && exists(bare) {
            targets.push(bare.to_string());
        }
    }

    targets
}

/// Whether `text` references `target` in any of the three forms
#[must_use]
pub fn references_path(text: &str, target: &str) -> bool {
    text.trim() == target || embedded_references(text).any(|path| path == target)
}

/// Rewrite every reference to `old` into a reference to `new`
///
/// Returns `None` when `text` does not reference `old`.
#[must_use]
pub fn rewrite_references(text: &str, old: &str, new: &str) -> Option<String> {
    if text.trim() == old {
        return Some(new.to_string());
    }

    if !embedded_references(text).any(|path| path == old) {
        return None;
    }

    let rewritten = REFERENCE_PATTERN.replace_all(text, |caps: &Captures<'_>| {
        if caps[1].trim() == old {
            format!("{{{new}}}")
        } else {
            caps[0].to_string()
        }
    });

    Some(rewritten.into_owned())
}

/// Substitute every embedded reference using `lookup`
///
/// Returns `None` if any reference cannot be substituted.
pub fn substitute_references<F>(text: &str, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut missing = false;
    let substituted = REFERENCE_PATTERN.replace_all(text, |caps: &Captures<'_>| {
        if let Some(value) = lookup(caps[1].trim()) {
            value
        } else {
            missing = true;
            caps[0].to_string()
        }
    });

    if missing {
        None
    } else {
        Some(substituted.into_owned())
    }
}
