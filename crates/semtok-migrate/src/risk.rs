//! Risk assessment
//!
//! Turns an audit into a per-dimension risk profile. The overall score is
//! the base risk every scenario template adjusts.

use semtok_audit::AuditResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse risk band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Below 25
    Low,
    /// 25 to 50
    Medium,
    /// 50 to 75
    High,
    /// 75 and above
    Critical,
}

impl RiskLevel {
    /// Band of a score in `[0, 100]`
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score < 25.0 {
            Self::Low
        } else if score < 50.0 {
            Self::Medium
        } else if score < 75.0 {
            Self::High
        } else {
            Self::Critical
        }
    }

    /// Get string identifier
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Migration risk of one token set, every dimension in `[0, 100]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    /// Weighted overall risk
    pub overall: f64,
    /// Share of non-compliant names
    pub naming: f64,
    /// Reference graph issues and depth
    pub dependency: f64,
    /// Missing required cells
    pub coverage: f64,
    /// Failing contrast pairs
    pub accessibility: f64,
    /// Size of the token set
    pub scale: f64,
    /// Band of `overall`
    pub level: RiskLevel,
    /// Dimensions that dominate the risk
    pub factors: Vec<String>,
}

/// Assess the migration risk of an audited store
#[must_use]
pub fn assess_risk(audit: &AuditResult) -> RiskProfile {
    let naming = (1.0 - audit.structure.compliance_rate).clamp(0.0, 1.0) * 100.0;

    let graph = &audit.dependencies;
    #[allow(clippy::cast_precision_loss)]
    let dependency = (15.0 * graph.error_count() as f64
        + 5.0 * graph.warning_count() as f64
        + 5.0 * graph.metrics.max_depth as f64)
        .min(100.0);

    let coverage = (1.0 - audit.coverage.score).clamp(0.0, 1.0) * 100.0;
    let accessibility = (1.0 - audit.accessibility.pass_rate).clamp(0.0, 1.0) * 100.0;
    #[allow(clippy::cast_precision_loss)]
    let scale = (audit.token_count as f64 / 10.0).min(100.0);

    let overall = 0.30 * naming
        + 0.25 * dependency
        + 0.15 * coverage
        + 0.15 * accessibility
        + 0.15 * scale;

    let factors = [
        ("naming", naming),
        ("dependency", dependency),
        ("coverage", coverage),
        ("accessibility", accessibility),
        ("scale", scale),
    ]
    .iter()
    .filter(|(_, score)| *score >= 50.0)
    .map(|(name, score)| format!("{name} risk is {score:.0}/100"))
    .collect();

    let profile = RiskProfile {
        overall,
        naming,
        dependency,
        coverage,
        accessibility,
        scale,
        level: RiskLevel::from_score(overall),
        factors,
    };
    tracing::debug!(overall = profile.overall, level = %profile.level, "Assessed risk");
    profile
}
