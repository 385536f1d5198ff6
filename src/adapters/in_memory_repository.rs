//! In-memory snapshot repository for testing.
//!
//! This adapter provides a pure in-memory implementation of
//! SnapshotRepository, enabling fast tests without any file system I/O.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex},
};

use crate::{Result, error::Error, ports::SnapshotRepository, q_learning::TableSnapshot};

/// In-memory repository for testing.
///
/// Stores snapshots in memory using a shared HashMap, avoiding file system
/// I/O entirely. Clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get the number of snapshots currently stored.
    pub fn count(&self) -> usize {
        self.storage.lock().unwrap().len()
    }

    /// Clear all stored snapshots.
    pub fn clear(&self) {
        self.storage.lock().unwrap().clear();
    }

    /// Check if a snapshot exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        let key = path.to_string_lossy().to_string();
        self.storage.lock().unwrap().contains_key(&key)
    }

    /// Overwrite the raw bytes stored at a path.
    ///
    /// Useful for tests that need to simulate a corrupt artifact.
    pub fn write_raw(&self, path: &Path, bytes: Vec<u8>) {
        let key = path.to_string_lossy().to_string();
        self.storage.lock().unwrap().insert(key, bytes);
    }
}

impl SnapshotRepository for InMemoryRepository {
    fn save(&self, snapshot: &TableSnapshot, path: &Path) -> Result<()> {
        let key = path.to_string_lossy().to_string();
        let bytes = serde_json::to_vec(snapshot)?;
        self.storage.lock().unwrap().insert(key, bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<TableSnapshot> {
        let key = path.to_string_lossy().to_string();
        let storage = self.storage.lock().unwrap();

        let bytes = storage.get(&key).ok_or_else(|| Error::Io {
            operation: format!("load snapshot from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_save_and_load() {
        let repo = InMemoryRepository::new();
        let path = Path::new("snapshot");

        assert_eq!(repo.count(), 0);
        assert!(!repo.contains(path));

        let snapshot = TableSnapshot {
            total_episodes: 7,
            ..Default::default()
        };
        repo.save(&snapshot, path).unwrap();

        assert_eq!(repo.count(), 1);
        assert!(repo.contains(path));
        assert_eq!(repo.load(path).unwrap().total_episodes, 7);
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = InMemoryRepository::new();
        assert!(repo.load(Path::new("nonexistent")).is_err());
    }

    #[test]
    fn test_load_corrupt_bytes_returns_error() {
        let repo = InMemoryRepository::new();
        let path = Path::new("broken");
        repo.write_raw(path, b"{ not json".to_vec());

        assert!(repo.load(path).is_err());
    }

    #[test]
    fn test_clone_shares_storage() {
        let repo1 = InMemoryRepository::new();
        let repo2 = repo1.clone();
        let path = Path::new("shared");

        repo1.save(&TableSnapshot::default(), path).unwrap();

        assert!(repo2.load(path).is_ok());
        assert_eq!(repo1.count(), 1);
        assert_eq!(repo2.count(), 1);
    }
}
