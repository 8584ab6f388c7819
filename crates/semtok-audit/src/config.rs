//! Audit configuration
//!
//! Every threshold and weight the analyzers and the health scorer use.

use serde::{Deserialize, Serialize};

/// Weights of the health score terms
///
/// Each term is scaled to 0-100 before weighting; the weights sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Naming compliance rate
    pub naming: f64,
    /// Coverage score
    pub coverage: f64,
    /// Scoping error penalty
    pub scoping_errors: f64,
    /// Scoping warning penalty
    pub scoping_warnings: f64,
    /// Contrast pass rate
    pub contrast: f64,
    /// Dependency issue penalty
    pub dependencies: f64,
    /// Anti-pattern penalty
    pub anti_patterns: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            naming: 0.20,
            coverage: 0.15,
            scoping_errors: 0.20,
            scoping_warnings: 0.08,
            contrast: 0.15,
            dependencies: 0.12,
            anti_patterns: 0.10,
        }
    }
}

impl ScoreWeights {
    /// Sum of all weights
    #[must_use]
    pub fn total(&self) -> f64 {
        self.naming
            + self.coverage
            + self.scoping_errors
            + self.scoping_warnings
            + self.contrast
            + self.dependencies
            + self.anti_patterns
    }
}

/// Points deducted per finding, and the cap of each penalty
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyPoints {
    /// Points per scoping error
    pub scoping_error: f64,
    /// Cap of the scoping error penalty
    pub scoping_error_cap: f64,
    /// Points per scoping warning
    pub scoping_warning: f64,
    /// Cap of the scoping warning penalty
    pub scoping_warning_cap: f64,
    /// Points per dependency error
    pub dependency_error: f64,
    /// Points per dependency warning
    pub dependency_warning: f64,
    /// Points per anti-pattern error
    pub anti_pattern_error: f64,
    /// Points per anti-pattern warning
    pub anti_pattern_warning: f64,
}

impl Default for PenaltyPoints {
    fn default() -> Self {
        Self {
            scoping_error: 5.0,
            scoping_error_cap: 20.0,
            scoping_warning: 2.0,
            scoping_warning_cap: 8.0,
            dependency_error: 20.0,
            dependency_warning: 5.0,
            anti_pattern_error: 15.0,
            anti_pattern_warning: 5.0,
        }
    }
}

/// Analyzer thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Minimum WCAG contrast ratio for normal text
    pub wcag_min_ratio: f64,
    /// Minimum absolute APCA lightness contrast
    pub apca_min_lc: f64,
    /// Intent-like path keywords checked for semantic drift
    pub drift_keywords: Vec<String>,
    /// Maximum red-channel spread among same-keyword colors
    pub drift_red_threshold: u8,
    /// Lenient parses below this confidence yield no suggestion
    pub suggestion_min_confidence: f64,
    /// Health score weights
    pub weights: ScoreWeights,
    /// Health score penalties
    pub penalties: PenaltyPoints,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            wcag_min_ratio: 4.5,
            apca_min_lc: 60.0,
            drift_keywords: [
                "primary", "secondary", "accent", "success", "warning", "danger", "error", "info",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
            drift_red_threshold: 50,
            suggestion_min_confidence: 0.30,
            weights: ScoreWeights::default(),
            penalties: PenaltyPoints::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        assert!((ScoreWeights::default().total() - 1.0).abs() < 1e-9);
    }
}
