//! In-memory Q-table repository for testing.
//!
//! This adapter provides a pure in-memory implementation of QTableRepository,
//! enabling fast tests without any file system I/O.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{
    Result,
    error::Error,
    ports::QTableRepository,
    q_learning::{QTable, SavedQTable},
};

/// In-memory repository for testing.
///
/// Snapshots are encoded exactly as on disk and kept in a shared map, so the
/// serialization path is still exercised. Clones share the same storage,
/// which lets a test hand one clone to an engine and inspect another.
///
/// # Examples
///
/// ```
/// use minicheckers::adapters::InMemoryRepository;
/// use minicheckers::ports::QTableRepository;
/// use minicheckers::q_learning::QTable;
/// use std::path::Path;
///
/// let repo = InMemoryRepository::new();
/// assert!(repo.load(Path::new("table"))?.is_none());
///
/// repo.save(&QTable::default(), Path::new("table"))?;
/// assert!(repo.load(Path::new("table"))?.is_some());
/// # Ok::<(), minicheckers::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    fail_saves: Arc<Mutex<bool>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get the number of snapshots currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Check if a snapshot exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(&path.to_string_lossy().to_string())
    }

    /// Store raw bytes at `path`, bypassing encoding.
    pub fn insert_raw(&self, path: &Path, bytes: Vec<u8>) {
        self.storage()
            .insert(path.to_string_lossy().to_string(), bytes);
    }

    /// Make every subsequent save fail with an I/O error.
    pub fn fail_saves(&self, fail: bool) {
        *self.fail_saves.lock().unwrap_or_else(|e| e.into_inner()) = fail;
    }

    /// Clear all stored snapshots.
    pub fn clear(&self) {
        self.storage().clear();
    }
}

impl QTableRepository for InMemoryRepository {
    fn save(&self, table: &QTable, path: &Path) -> Result<()> {
        if *self.fail_saves.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(Error::Io {
                operation: format!("save Q-table to in-memory storage at {path:?}"),
                source: std::io::Error::other("storage unavailable"),
            });
        }

        let bytes = SavedQTable::from_table(table).to_bytes()?;
        self.storage()
            .insert(path.to_string_lossy().to_string(), bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Option<QTable>> {
        let key = path.to_string_lossy().to_string();
        let storage = self.storage();

        match storage.get(&key) {
            Some(bytes) => SavedQTable::from_bytes(bytes)?.to_table().map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::{Action, Board};

    #[test]
    fn test_in_memory_save_and_load() {
        let repo = InMemoryRepository::new();
        let path = Path::new("table");
        let mut table = QTable::default();
        table.set(Board::initial().state_key(), Action::new(0, 0, 1, 1), -3.0);

        assert_eq!(repo.count(), 0);
        assert!(!repo.contains(path));

        repo.save(&table, path).unwrap();
        assert_eq!(repo.count(), 1);
        assert!(repo.contains(path));

        assert_eq!(repo.load(path).unwrap(), Some(table));
    }

    #[test]
    fn test_load_nonexistent_is_none() {
        let repo = InMemoryRepository::new();
        assert!(repo.load(Path::new("nonexistent")).unwrap().is_none());
    }

    #[test]
    fn test_clone_shares_storage() {
        let repo1 = InMemoryRepository::new();
        let repo2 = repo1.clone();

        repo1.save(&QTable::default(), Path::new("shared")).unwrap();
        assert!(repo2.load(Path::new("shared")).unwrap().is_some());

        repo2.clear();
        assert_eq!(repo1.count(), 0);
    }

    #[test]
    fn test_failing_saves() {
        let repo = InMemoryRepository::new();
        repo.fail_saves(true);
        let err = repo.save(&QTable::default(), Path::new("t")).unwrap_err();
        assert!(err.is_storage_failure());
        assert_eq!(repo.count(), 0);
    }

    #[test]
    fn test_corrupt_bytes_fail_to_load() {
        let repo = InMemoryRepository::new();
        repo.insert_raw(Path::new("bad"), vec![0xc1]);
        assert!(repo.load(Path::new("bad")).is_err());
    }
}
