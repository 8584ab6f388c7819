//! Scenario comparator
//!
//! Scores scenarios as a weighted sum of normalised metrics. Cost metrics
//! are inverted so that higher is always better.

use crate::config::ComparatorWeights;
use crate::plan::{Approach, MigrationScenario, ScenarioId};
use serde::{Deserialize, Serialize};

/// Weighted contribution of each dimension
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreContributions {
    /// `weight * (1 - risk / 100)`
    pub risk: f64,
    /// `weight * (1 - effort / max effort)`
    pub effort: f64,
    /// `weight * (1 - days / max days)`
    pub timeline: f64,
    /// `weight * success probability`
    pub completeness: f64,
}

impl ScoreContributions {
    /// Sum of contributions
    #[inline]
    #[must_use]
    pub fn total(&self) -> f64 {
        self.risk + self.effort + self.timeline + self.completeness
    }

    /// Dimensions sorted by contribution, largest first
    fn ranked(&self) -> [(&'static str, f64); 4] {
        let mut ranked = [
            ("risk", self.risk),
            ("effort", self.effort),
            ("timeline", self.timeline),
            ("completeness", self.completeness),
        ];
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

/// Score of one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioScore {
    /// Scenario identifier
    pub scenario_id: ScenarioId,
    /// Template used
    pub approach: Approach,
    /// Weighted score in `[0, 1]` for weights summing to one
    pub score: f64,
    /// Per-dimension contributions
    pub contributions: ScoreContributions,
}

/// Ranked comparison with a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    /// Scores, best first
    pub ranking: Vec<ScenarioScore>,
    /// Highest-scoring approach
    pub recommended: Approach,
    /// Why the recommendation won
    pub rationale: String,
}

fn inverted(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        1.0
    } else {
        (1.0 - value / max).clamp(0.0, 1.0)
    }
}

/// Compare scenarios
///
/// Returns `None` for an empty slice. Ties keep input order.
#[must_use]
pub fn compare_scenarios(
    scenarios: &[MigrationScenario],
    weights: &ComparatorWeights,
) -> Option<ScenarioComparison> {
    let max_effort = scenarios.iter().map(|s| s.estimated_effort).max()?;
    let max_days = scenarios.iter().map(|s| s.estimated_days).max()?;

    let mut ranking: Vec<ScenarioScore> = scenarios
        .iter()
        .map(|s| {
            let contributions = ScoreContributions {
                risk: weights.risk * inverted(s.risk_score, 100.0),
                effort: weights.effort
                    * inverted(f64::from(s.estimated_effort), f64::from(max_effort)),
                timeline: weights.timeline
                    * inverted(f64::from(s.estimated_days), f64::from(max_days)),
                completeness: weights.completeness * s.success_probability.clamp(0.0, 1.0),
            };
            ScenarioScore {
                scenario_id: s.id,
                approach: s.approach,
                score: contributions.total(),
                contributions,
            }
        })
        .collect();
    ranking.sort_by(|a, b| b.score.total_cmp(&a.score));

    let best = ranking.first()?;
    let [first, second, ..] = best.contributions.ranked();
    let mut rationale = format!(
        "{} scores {:.2}, led by {} ({:.2}) and {} ({:.2})",
        best.approach, best.score, first.0, first.1, second.0, second.1
    );
    if let Some(runner_up) = ranking.get(1) {
        rationale = format!(
            "{rationale}; {:.2} ahead of {}",
            best.score - runner_up.score,
            runner_up.approach
        );
    }

    tracing::debug!(recommended = %best.approach, score = best.score, "Compared scenarios");

    Some(ScenarioComparison {
        recommended: best.approach,
        rationale,
        ranking,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(approach: Approach, risk: f64, effort: u32, days: u32, success: f64) -> MigrationScenario {
        MigrationScenario {
            id: ScenarioId::new(),
            approach,
            name: approach.to_string(),
            description: String::new(),
            risk_score: risk,
            phases: Vec::new(),
            estimated_effort: effort,
            estimated_days: days,
            success_probability: success,
            benefits: Vec::new(),
            challenges: Vec::new(),
            prerequisites: Vec::new(),
        }
    }

    #[test]
    fn defaults_prefer_the_cheap_safe_plan() {
        let scenarios = vec![
            scenario(Approach::Conservative, 20.0, 24, 3, 0.95),
            scenario(Approach::Progressive, 35.0, 92, 12, 0.80),
            scenario(Approach::Comprehensive, 60.0, 196, 11, 0.65),
        ];
        let comparison = compare_scenarios(&scenarios, &ComparatorWeights::default()).unwrap();

        assert_eq!(comparison.recommended, Approach::Conservative);
        assert_eq!(comparison.ranking.len(), 3);
        // 0.28 + 0.2194 + 0.15 + 0.19
        assert!((comparison.ranking[0].score - 0.8394).abs() < 1e-3);
        assert!(comparison.rationale.starts_with("conservative scores 0.84, led by risk"));
        assert!(comparison.rationale.contains("ahead of progressive"));
    }

    #[test]
    fn completeness_weight_can_flip_the_choice() {
        let scenarios = vec![
            scenario(Approach::Conservative, 20.0, 24, 3, 0.10),
            scenario(Approach::Comprehensive, 60.0, 196, 11, 0.99),
        ];
        let weights = ComparatorWeights {
            risk: 0.0,
            effort: 0.0,
            timeline: 0.0,
            completeness: 1.0,
        };
        let comparison = compare_scenarios(&scenarios, &weights).unwrap();
        assert_eq!(comparison.recommended, Approach::Comprehensive);
    }

    #[test]
    fn empty_input_has_no_comparison() {
        assert!(compare_scenarios(&[], &ComparatorWeights::default()).is_none());
    }
}
