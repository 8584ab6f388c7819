//! Accessibility pairing
//!
//! Groups color tokens by `(context, intent, modifier, state)` and checks
//! every background against every text/icon token of the same group.

use crate::config::AuditConfig;
use crate::contrast::ContrastChecker;
use crate::parsed::ParsedToken;
use crate::structure::ratio;
use semtok_ontology::{PropertyClass, SemanticTokenName};
use semtok_token::{resolve_value, TokenStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pairing key of a structured name
#[must_use]
pub fn group_key(name: &SemanticTokenName) -> String {
    format!(
        "{}::{}::{}::{}",
        name.ux_context.map_or("global", |c| c.as_str()),
        name.intent,
        name.effective_modifier(),
        name.effective_state()
    )
}

/// One background/foreground pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastPair {
    /// Pairing group
    pub group: String,
    /// Background token
    pub background: String,
    /// Text or icon token
    pub foreground: String,
    /// Background color, if literal
    pub background_color: Option<String>,
    /// Foreground color, if literal
    pub foreground_color: Option<String>,
    /// Both colors could be checked
    pub computable: bool,
    /// WCAG ratio
    pub wcag_ratio: Option<f64>,
    /// APCA Lc
    pub apca_lc: Option<f64>,
    /// WCAG ratio below the minimum
    pub wcag_fail: bool,
    /// APCA |Lc| below the minimum
    pub apca_fail: bool,
}

impl ContrastPair {
    /// Computable and failing either check
    #[inline]
    #[must_use]
    pub fn fails(&self) -> bool {
        self.computable && (self.wcag_fail || self.apca_fail)
    }
}

/// Accessibility findings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityReport {
    /// Every pair formed
    pub pairs: Vec<ContrastPair>,
    /// Number of pairs
    pub total_pairs: usize,
    /// Pairs with two checkable colors
    pub computable_pairs: usize,
    /// Pairs under the WCAG minimum
    pub wcag_failures: usize,
    /// Pairs under the APCA minimum
    pub apca_failures: usize,
    /// Pairs failing either check
    pub failing_pairs: usize,
    /// Tokens in groups with only one side populated
    pub unpaired: Vec<String>,
    /// Passing share of computable pairs, `1.0` when none are computable
    pub pass_rate: f64,
}

#[derive(Default)]
struct Group<'a> {
    backgrounds: Vec<&'a str>,
    foregrounds: Vec<&'a str>,
}

/// Run the accessibility pairing over parsed color tokens
pub(crate) fn analyze_accessibility(
    parsed: &[ParsedToken<'_>],
    store: &dyn TokenStore,
    checker: &dyn ContrastChecker,
    config: &AuditConfig,
) -> AccessibilityReport {
    let mut groups: BTreeMap<String, Group<'_>> = BTreeMap::new();

    for entry in parsed {
        let is_background = entry.name.property_class == PropertyClass::Background;
        let is_foreground = entry.name.property_class.is_foreground();
        if !(is_background || is_foreground) {
            continue;
        }
        let is_color = entry.token.is_color()
            || resolve_value(store, &entry.token.path).is_some_and(|v| v.is_color_literal());
        if !is_color {
            continue;
        }

        let group = groups.entry(group_key(&entry.name)).or_default();
        if is_background {
            group.backgrounds.push(&entry.token.path);
        } else {
            group.foregrounds.push(&entry.token.path);
        }
    }

    let color_of = |path: &str| resolve_value(store, path).and_then(|v| v.hex_color());

    let mut report = AccessibilityReport::default();
    for (key, group) in &groups {
        if group.backgrounds.is_empty() || group.foregrounds.is_empty() {
            report
                .unpaired
                .extend(group.backgrounds.iter().chain(&group.foregrounds).map(|p| (*p).to_string()));
            continue;
        }

        for background in &group.backgrounds {
            for foreground in &group.foregrounds {
                let background_color = color_of(*background);
                let foreground_color = color_of(*foreground);
                let result = match (&foreground_color, &background_color) {
                    (Some(fg), Some(bg)) => checker.check(fg, bg),
                    _ => None,
                };

                let pair = match result {
                    Some(result) => ContrastPair {
                        group: key.clone(),
                        background: (*background).to_string(),
                        foreground: (*foreground).to_string(),
                        background_color,
                        foreground_color,
                        computable: true,
                        wcag_fail: result.wcag_ratio < config.wcag_min_ratio,
                        apca_fail: result.apca_lc.abs() < config.apca_min_lc,
                        wcag_ratio: Some(result.wcag_ratio),
                        apca_lc: Some(result.apca_lc),
                    },
                    None => ContrastPair {
                        group: key.clone(),
                        background: (*background).to_string(),
                        foreground: (*foreground).to_string(),
                        background_color,
                        foreground_color,
                        computable: false,
                        wcag_ratio: None,
                        apca_lc: None,
                        wcag_fail: false,
                        apca_fail: false,
                    },
                };
                report.pairs.push(pair);
            }
        }
    }

    report.total_pairs = report.pairs.len();
    report.computable_pairs = report.pairs.iter().filter(|p| p.computable).count();
    report.wcag_failures = report.pairs.iter().filter(|p| p.computable && p.wcag_fail).count();
    report.apca_failures = report.pairs.iter().filter(|p| p.computable && p.apca_fail).count();
    report.failing_pairs = report.pairs.iter().filter(|p| p.fails()).count();
    report.pass_rate = ratio(
        report.computable_pairs - report.failing_pairs,
        report.computable_pairs,
    );
    report
}
