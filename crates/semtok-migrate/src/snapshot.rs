//! Store snapshots
//!
//! A snapshot is an owned deep copy; nothing aliases the live store, so a
//! rollback is a wholesale replace.

use chrono::{DateTime, Utc};
use semtok_token::{export_tokens, replace_tokens, Token, TokenStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Unique snapshot identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SnapshotId(pub Ulid);

impl SnapshotId {
    /// Generate new snapshot ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable deep copy of a token store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationSnapshot {
    /// Snapshot identifier
    pub id: SnapshotId,
    /// Capture time
    pub created_at: DateTime<Utc>,
    /// Why the snapshot was taken
    pub label: String,
    tokens: Vec<Token>,
}

impl MigrationSnapshot {
    /// Captured tokens, in store iteration order
    #[inline]
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of captured tokens
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the snapshot is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Capture the current store content
#[must_use]
pub fn create_snapshot(store: &dyn TokenStore, label: impl Into<String>) -> MigrationSnapshot {
    let snapshot = MigrationSnapshot {
        id: SnapshotId::new(),
        created_at: Utc::now(),
        label: label.into(),
        tokens: export_tokens(store),
    };
    tracing::info!(id = %snapshot.id, tokens = snapshot.len(), "Created snapshot");
    snapshot
}

/// Replace the store content with the snapshot
///
/// The snapshot itself is not consumed and can be restored again.
pub fn rollback(store: &mut dyn TokenStore, snapshot: &MigrationSnapshot) {
    replace_tokens(store, snapshot.tokens.iter().cloned());
    tracing::info!(id = %snapshot.id, tokens = snapshot.len(), "Rolled back to snapshot");
}

#[cfg(test)]
mod tests {
    use super::*;
    use semtok_token::MemoryTokenStore;

    #[test]
    fn snapshot_is_independent_of_store() {
        let mut store = MemoryTokenStore::from_raw([("a", "#fff"), ("b", "{a}")]);
        let snapshot = create_snapshot(&store, "before");

        store.remove("a");
        store.insert(Token::from_raw("c", "1px"));
        assert_eq!(snapshot.len(), 2);

        rollback(&mut store, &snapshot);
        let paths: Vec<String> = store.paths();
        assert_eq!(paths, vec!["a", "b"]);
    }

    #[test]
    fn rollback_can_repeat() {
        let mut store = MemoryTokenStore::from_raw([("a", "#fff")]);
        let snapshot = create_snapshot(&store, "before");
        rollback(&mut store, &snapshot);
        store.clear();
        rollback(&mut store, &snapshot);
        assert_eq!(store.len(), 1);
    }
}
