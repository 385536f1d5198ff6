//! JSON file implementation of the snapshot repository.
//!
//! This adapter implements the SnapshotRepository port using serde_json. The
//! artifact is a plain JSON document, so trained tables stay inspectable
//! with standard tooling.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use crate::{Result, error::Error, ports::SnapshotRepository, q_learning::TableSnapshot};

/// JSON-file-backed snapshot repository.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use qoxo::adapters::JsonRepository;
/// use qoxo::ports::SnapshotRepository;
/// use qoxo::q_learning::TableSnapshot;
///
/// let repo = JsonRepository::new();
/// let snapshot = TableSnapshot::default();
///
/// repo.save(&snapshot, Path::new("trained.json"))?;
/// let loaded = repo.load(Path::new("trained.json"))?;
/// # Ok::<(), qoxo::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRepository;

impl JsonRepository {
    /// Create a new JSON repository.
    pub fn new() -> Self {
        Self
    }
}

impl SnapshotRepository for JsonRepository {
    fn save(&self, snapshot: &TableSnapshot, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| Error::Io {
                operation: format!("create directory {parent:?}"),
                source,
            })?;
        }

        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer(writer, snapshot)?;

        Ok(())
    }

    fn load(&self, path: &Path) -> Result<TableSnapshot> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let reader = BufReader::new(file);
        let snapshot = serde_json::from_reader(reader)?;

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_json_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("snapshot.json");

        let repo = JsonRepository::new();
        let snapshot = TableSnapshot {
            total_episodes: 42,
            ..Default::default()
        };

        repo.save(&snapshot, &file_path).expect("Failed to save");
        let loaded = repo.load(&file_path).expect("Failed to load");

        assert_eq!(loaded.total_episodes, 42);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let nested = temp_dir.path().join("models").join("easy.json");

        let repo = JsonRepository::new();
        repo.save(&TableSnapshot::default(), &nested)
            .expect("Failed to save into nested directory");

        assert!(nested.exists());
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = JsonRepository::new();
        let result = repo.load(Path::new("/tmp/nonexistent_qoxo_12345.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_malformed_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("broken.json");
        std::fs::write(&file_path, "{ not json").expect("Failed to write file");

        let repo = JsonRepository::new();
        assert!(repo.load(&file_path).is_err());
    }
}
