//! Migration plan model
//!
//! A scenario is an ordered list of phases; a phase is an ordered list of
//! typed actions. Plans are generated once and read-only afterwards.

use crate::error::MigrationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Unique scenario identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScenarioId(pub Ulid);

impl ScenarioId {
    /// Generate new scenario ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for ScenarioId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Migration approach template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Approach {
    /// Fix what is broken, rename only safe tokens
    Conservative,
    /// Align structure and fill coverage gaps
    Progressive,
    /// Full restructure with tooling and optimisation
    Comprehensive,
}

impl Approach {
    /// All approaches, least to most invasive
    pub const ALL: &'static [Self] = &[Self::Conservative, Self::Progressive, Self::Comprehensive];

    /// Get string identifier
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Progressive => "progressive",
            Self::Comprehensive => "comprehensive",
        }
    }
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Approach {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| MigrationError::UnknownApproach(s.to_string()))
    }
}

/// Kind of migration action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    /// Move tokens to new paths, rewriting references
    Rename,
    /// Fold sources into the first target
    Merge,
    /// Flag a token for manual splitting
    Split,
    /// Rebuild compliant paths in canonical form
    Restructure,
    /// Remove unreferenced tokens
    Delete,
    /// Insert placeholder tokens
    Create,
    /// Backfill metadata
    UpdateReferences,
}

impl ActionKind {
    /// Get string identifier
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rename => "rename",
            Self::Merge => "merge",
            Self::Split => "split",
            Self::Restructure => "restructure",
            Self::Delete => "delete",
            Self::Create => "create",
            Self::UpdateReferences => "update-references",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post-action check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationCheck {
    /// Reference graph is acyclic
    NoCircularDependencies,
    /// Every reference resolves
    NoBrokenReferences,
    /// Touched paths parse strictly
    NamingConventionCompliance,
}

impl ValidationCheck {
    /// Every check
    pub const ALL: &'static [Self] = &[
        Self::NoCircularDependencies,
        Self::NoBrokenReferences,
        Self::NamingConventionCompliance,
    ];

    /// Human-readable check name
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoCircularDependencies => "no circular dependencies",
            Self::NoBrokenReferences => "no broken references",
            Self::NamingConventionCompliance => "naming convention compliance",
        }
    }
}

impl fmt::Display for ValidationCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One typed unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationAction {
    /// Stable identifier within the scenario
    pub id: String,
    /// Action kind
    #[serde(rename = "type")]
    pub kind: ActionKind,
    /// Human-readable description
    pub description: String,
    /// Paths the action operates on
    pub targets: Vec<String>,
    /// Explicit destinations, parallel to `targets`; empty means reconstruct
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub new_paths: Vec<String>,
    /// Raw value for created tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Checks run after the action when validation is requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<ValidationCheck>,
}

impl MigrationAction {
    /// Create action
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        kind: ActionKind,
        description: impl Into<String>,
        targets: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            description: description.into(),
            targets,
            new_paths: Vec::new(),
            value: None,
            validations: Vec::new(),
        }
    }

    /// Builder: explicit destinations
    #[must_use]
    pub fn with_new_paths(mut self, new_paths: Vec<String>) -> Self {
        self.new_paths = new_paths;
        self
    }

    /// Builder: raw value for created tokens
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Builder: validation checks
    #[must_use]
    pub fn with_validations(mut self, checks: &[ValidationCheck]) -> Self {
        self.validations = checks.to_vec();
        self
    }

    /// Explicit destination of the target at `index`
    #[inline]
    #[must_use]
    pub fn new_path(&self, index: usize) -> Option<&str> {
        self.new_paths.get(index).map(String::as_str)
    }
}

/// Ordered stage of a scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationPhase {
    /// Stable identifier within the scenario
    pub id: String,
    /// Phase name
    pub name: String,
    /// What the phase achieves
    pub description: String,
    /// Actions in execution order
    pub actions: Vec<MigrationAction>,
    /// Budgeted hours
    pub effort_hours: u32,
    /// Phases that must run first
    pub dependencies: Vec<String>,
    /// How to undo the phase
    pub rollback_plan: String,
}

/// Named, risk-scored, multi-phase migration plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationScenario {
    /// Scenario identifier
    pub id: ScenarioId,
    /// Template used
    pub approach: Approach,
    /// Display name
    pub name: String,
    /// Summary
    pub description: String,
    /// Risk in `[0, 100]`
    pub risk_score: f64,
    /// Phases in execution order
    pub phases: Vec<MigrationPhase>,
    /// Sum of phase hours
    pub estimated_effort: u32,
    /// Working days at the configured capacity
    pub estimated_days: u32,
    /// Probability of finishing without rollback
    pub success_probability: f64,
    /// Expected benefits
    pub benefits: Vec<String>,
    /// Expected difficulties
    pub challenges: Vec<String>,
    /// What must be in place first
    pub prerequisites: Vec<String>,
}

impl MigrationScenario {
    /// Total number of actions
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.phases.iter().map(|p| p.actions.len()).sum()
    }

    /// Phase by identifier
    #[must_use]
    pub fn phase(&self, id: &str) -> Option<&MigrationPhase> {
        self.phases.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approach_parses_case_insensitively() {
        assert_eq!("Progressive".parse::<Approach>().unwrap(), Approach::Progressive);
        assert!(matches!(
            "radical".parse::<Approach>(),
            Err(MigrationError::UnknownApproach(_))
        ));
    }

    #[test]
    fn action_serializes_type_tag() {
        let action = MigrationAction::new("a1", ActionKind::UpdateReferences, "backfill", vec![]);
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "update-references");
        assert!(json.get("newPaths").is_none());
    }
}
