//! Repository port for snapshot persistence.
//!
//! This module defines the trait boundary between the domain and
//! infrastructure layers for storing and retrieving trained value tables.

use std::path::Path;

use crate::{Result, q_learning::TableSnapshot};

/// Port for persisting and loading table snapshots.
///
/// This trait abstracts the storage mechanism, allowing different
/// implementations (file-backed JSON, in-memory, etc.) without coupling the
/// domain logic to a specific medium.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use qoxo::ports::SnapshotRepository;
/// use qoxo::q_learning::TableSnapshot;
///
/// fn save_snapshot<R: SnapshotRepository>(
///     repo: &R,
///     snapshot: &TableSnapshot,
///     path: &Path,
/// ) -> qoxo::Result<()> {
///     repo.save(snapshot, path)
/// }
/// ```
pub trait SnapshotRepository {
    /// Save a snapshot to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be created or written to, or if
    /// serialization fails.
    fn save(&self, snapshot: &TableSnapshot, path: &Path) -> Result<()>;

    /// Load a snapshot from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or does
    /// not deserialize. Callers that want the silent-reset behavior go
    /// through [`QLearningAgent::restore`] instead of calling this directly.
    ///
    /// [`QLearningAgent::restore`]: crate::q_learning::QLearningAgent::restore
    fn load(&self, path: &Path) -> Result<TableSnapshot>;
}
