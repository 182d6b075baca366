//! Persistent baseline store with crash-safe backup

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::{NodeSet, Snapshot};

/// The persisted record: last accepted baseline plus the critical-alert flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorState {
    /// Node count at the last accepted observation
    pub total_nodes: usize,
    /// Node identifiers of the last accepted observation
    pub nodes: NodeSet,
    /// Whether the zero-node critical alert is currently active
    #[serde(default)]
    pub zero_alert_active: bool,
    /// When the record was last rewritten
    pub updated_at: DateTime<Utc>,
}

impl MonitorState {
    /// Build the record for an accepted snapshot; clears the alert flag
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            total_nodes: snapshot.nodes.len(),
            nodes: snapshot.nodes.clone(),
            zero_alert_active: false,
            updated_at: snapshot.observed_at,
        }
    }
}

/// File-backed store for [`MonitorState`].
///
/// Every rewrite first copies the current file to a `.bak` sibling, then
/// writes a temp file and renames it over the primary. The backup is never
/// deleted automatically, so a corrupted primary always has a fallback.
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Create a store for the given state file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backup copy
    pub fn backup_path(&self) -> PathBuf {
        self.path.with_extension("bak")
    }

    /// Load the persisted state.
    ///
    /// A missing file means a first run. An unreadable or unparseable file
    /// falls back to the backup copy; if that also fails, the monitor
    /// bootstraps from an empty baseline. Corruption never errors the
    /// cycle loop.
    pub fn load(&self) -> Option<MonitorState> {
        match Self::read_state(&self.path) {
            Ok(Some(state)) => return Some(state),
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "State file unreadable, trying backup"
                );
            }
        }

        let backup = self.backup_path();
        match Self::read_state(&backup) {
            Ok(Some(state)) => {
                tracing::info!(path = %backup.display(), "Baseline restored from backup");
                Some(state)
            }
            Ok(None) => {
                tracing::warn!("No backup found, starting from empty baseline");
                None
            }
            Err(e) => {
                tracing::warn!(
                    path = %backup.display(),
                    error = %e,
                    "Backup unreadable, starting from empty baseline"
                );
                None
            }
        }
    }

    /// Persist the state, backing up the prior version first
    pub fn commit(&self, state: &MonitorState) -> Result<(), StateError> {
        let data = serde_json::to_string_pretty(state)
            .map_err(|e| StateError::Serialization(e.to_string()))?;

        if self.path.exists() {
            fs::copy(&self.path, self.backup_path())?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }

    fn read_state(path: &Path) -> Result<Option<MonitorState>, StateError> {
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(path)?;
        let state = serde_json::from_str(&data)
            .map_err(|e| StateError::Deserialization(e.to_string()))?;
        Ok(Some(state))
    }
}

/// State persistence errors
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_state(nodes: &[&str]) -> MonitorState {
        let set: NodeSet = nodes.iter().map(|n| n.to_string()).collect();
        MonitorState::from_snapshot(&Snapshot::now(set))
    }

    fn store_in(dir: &TempDir) -> StateStore {
        StateStore::new(dir.path().join("state.json"))
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_commit_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.commit(&make_state(&["a:1", "b:2"])).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.total_nodes, 2);
        assert!(loaded.nodes.contains("a:1"));
        assert!(!loaded.zero_alert_active);
    }

    #[test]
    fn test_commit_backs_up_previous_version() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.commit(&make_state(&["a:1"])).unwrap();
        store.commit(&make_state(&["a:1", "b:2"])).unwrap();

        let backup = fs::read_to_string(store.backup_path()).unwrap();
        let previous: MonitorState = serde_json::from_str(&backup).unwrap();
        assert_eq!(previous.total_nodes, 1);
    }

    #[test]
    fn test_corrupt_primary_falls_back_to_backup() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.commit(&make_state(&["a:1", "b:2", "c:3"])).unwrap();
        store.commit(&make_state(&["a:1"])).unwrap();

        // Simulate a crash mid-write that left a partial record
        fs::write(dir.path().join("state.json"), "{\"total_nodes\": 1, \"nod").unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.total_nodes, 3);
    }

    #[test]
    fn test_both_corrupt_bootstraps_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.commit(&make_state(&["a:1"])).unwrap();
        store.commit(&make_state(&["a:1", "b:2"])).unwrap();

        fs::write(dir.path().join("state.json"), "not json").unwrap();
        fs::write(store.backup_path(), "also not json").unwrap();

        assert!(store.load().is_none());
    }
}
