//! Health scorer
//!
//! Combines the sub-reports into a single score in `[0, 100]`. Every term
//! is scaled to 0-100 before weighting so the breakdown reads uniformly.

use crate::config::{PenaltyPoints, ScoreWeights};
use serde::{Deserialize, Serialize};

/// Inputs of the health score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreInputs {
    /// Naming compliance rate in `[0, 1]`
    pub compliance_rate: f64,
    /// Coverage score in `[0, 1]`
    pub coverage: f64,
    /// Scoping errors
    pub scoping_errors: usize,
    /// Scoping warnings
    pub scoping_warnings: usize,
    /// Contrast pass rate in `[0, 1]`
    pub contrast_pass_rate: f64,
    /// Dependency errors
    pub dependency_errors: usize,
    /// Dependency warnings
    pub dependency_warnings: usize,
    /// Anti-pattern errors
    pub anti_pattern_errors: usize,
    /// Anti-pattern warnings
    pub anti_pattern_warnings: usize,
}

/// Per-term scores, each in `[0, 100]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Naming compliance
    pub naming: f64,
    /// Coverage
    pub coverage: f64,
    /// Scoping errors
    pub scoping_errors: f64,
    /// Scoping warnings
    pub scoping_warnings: f64,
    /// Contrast
    pub contrast: f64,
    /// Dependencies
    pub dependencies: f64,
    /// Anti-patterns
    pub anti_patterns: f64,
}

/// Final health score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthScore {
    /// Rounded, clamped score
    pub score: u8,
    /// Term scores before weighting
    pub breakdown: ScoreBreakdown,
}

#[allow(clippy::cast_precision_loss)]
fn capped_term(count: usize, points: f64, cap: f64) -> f64 {
    if cap <= 0.0 {
        return 100.0;
    }
    let penalty = (count as f64 * points).min(cap);
    (cap - penalty) / cap * 100.0
}

/// Compute the weighted health score
#[must_use]
pub fn health_score(inputs: &ScoreInputs, weights: &ScoreWeights, penalties: &PenaltyPoints) -> HealthScore {
    #[allow(clippy::cast_precision_loss)]
    let dependency_points = inputs.dependency_errors as f64 * penalties.dependency_error
        + inputs.dependency_warnings as f64 * penalties.dependency_warning;
    #[allow(clippy::cast_precision_loss)]
    let anti_pattern_points = inputs.anti_pattern_errors as f64 * penalties.anti_pattern_error
        + inputs.anti_pattern_warnings as f64 * penalties.anti_pattern_warning;

    let breakdown = ScoreBreakdown {
        naming: inputs.compliance_rate.clamp(0.0, 1.0) * 100.0,
        coverage: inputs.coverage.clamp(0.0, 1.0) * 100.0,
        scoping_errors: capped_term(
            inputs.scoping_errors,
            penalties.scoping_error,
            penalties.scoping_error_cap,
        ),
        scoping_warnings: capped_term(
            inputs.scoping_warnings,
            penalties.scoping_warning,
            penalties.scoping_warning_cap,
        ),
        contrast: inputs.contrast_pass_rate.clamp(0.0, 1.0) * 100.0,
        dependencies: 100.0 - dependency_points.min(100.0),
        anti_patterns: 100.0 - anti_pattern_points.min(100.0),
    };

    let weighted = breakdown.naming * weights.naming
        + breakdown.coverage * weights.coverage
        + breakdown.scoping_errors * weights.scoping_errors
        + breakdown.scoping_warnings * weights.scoping_warnings
        + breakdown.contrast * weights.contrast
        + breakdown.dependencies * weights.dependencies
        + breakdown.anti_patterns * weights.anti_patterns;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let score = weighted.round().clamp(0.0, 100.0) as u8;

    HealthScore { score, breakdown }
}
