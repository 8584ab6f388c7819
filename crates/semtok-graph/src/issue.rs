//! Severity-tagged findings

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must be fixed
    Error,
    /// Should be fixed
    Warning,
    /// Worth knowing
    Info,
}

impl Severity {
    /// Stable identifier
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of dependency defect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// Reference chain loops back on itself
    Circular,
    /// Reference target does not exist
    Unresolved,
    /// Reference chain longer than the configured threshold
    DeepChain,
    /// Token neither references nor is referenced
    Orphaned,
}

/// One dependency defect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphIssue {
    /// Severity
    pub severity: Severity,
    /// Defect kind
    #[serde(rename = "type")]
    pub kind: IssueKind,
    /// Human-readable message
    pub message: String,
    /// Paths involved
    pub paths: Vec<String>,
}

impl GraphIssue {
    /// Create issue
    #[inline]
    #[must_use]
    pub fn new(severity: Severity, kind: IssueKind, message: impl Into<String>, paths: Vec<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
            paths,
        }
    }
}
