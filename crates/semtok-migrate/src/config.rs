//! Migration configuration

use serde::{Deserialize, Serialize};

/// Team available to carry out a scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamCapacity {
    /// People working in parallel
    pub team_size: u32,
    /// Hours per person per week
    pub hours_per_week: u32,
}

impl TeamCapacity {
    /// Create capacity
    #[inline]
    #[must_use]
    pub const fn new(team_size: u32, hours_per_week: u32) -> Self {
        Self {
            team_size,
            hours_per_week,
        }
    }

    /// Working days needed for `effort_hours`
    ///
    /// `ceil((effort / team) / (hours_per_week / 5))`; a zero-sized team or
    /// week is treated as one.
    #[must_use]
    pub fn days_for(&self, effort_hours: u32) -> u32 {
        let team = f64::from(self.team_size.max(1));
        let hours_per_day = f64::from(self.hours_per_week.max(1)) / 5.0;
        let days = (f64::from(effort_hours) / team / hours_per_day).ceil();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let days = days.max(0.0) as u32;
        days
    }
}

/// Team capacity per approach
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamCapacities {
    /// Conservative approach
    pub conservative: TeamCapacity,
    /// Progressive approach
    pub progressive: TeamCapacity,
    /// Comprehensive approach
    pub comprehensive: TeamCapacity,
}

impl Default for TeamCapacities {
    fn default() -> Self {
        Self {
            conservative: TeamCapacity::new(2, 20),
            progressive: TeamCapacity::new(2, 20),
            comprehensive: TeamCapacity::new(3, 30),
        }
    }
}

/// Weights of the scenario comparator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparatorWeights {
    /// Lower risk is better
    pub risk: f64,
    /// Lower effort is better
    pub effort: f64,
    /// Fewer days is better
    pub timeline: f64,
    /// Success probability
    pub completeness: f64,
}

impl Default for ComparatorWeights {
    fn default() -> Self {
        Self {
            risk: 0.35,
            effort: 0.25,
            timeline: 0.2,
            completeness: 0.2,
        }
    }
}

/// Scenario generation and comparison settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Suggestions at or above this confidence count as low-risk renames
    pub low_risk_rename_confidence: f64,
    /// Team capacity per approach
    pub capacities: TeamCapacities,
    /// Comparator weights
    pub comparator: ComparatorWeights,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            low_risk_rename_confidence: 0.80,
            capacities: TeamCapacities::default(),
            comparator: ComparatorWeights::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_round_up() {
        // 24h / 2 people / 4h a day
        assert_eq!(TeamCapacity::new(2, 20).days_for(24), 3);
        // 92h / 2 / 4 = 11.5
        assert_eq!(TeamCapacity::new(2, 20).days_for(92), 12);
        // 196h / 3 / 6 = 10.9
        assert_eq!(TeamCapacity::new(3, 30).days_for(196), 11);
    }

    #[test]
    fn zero_capacity_does_not_divide_by_zero() {
        assert_eq!(TeamCapacity::new(0, 0).days_for(10), 50);
    }
}
