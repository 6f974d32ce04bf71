//! Repository port for Q-table persistence.
//!
//! This module defines the trait boundary between the learning engine and
//! the storage that keeps its table between runs.

use std::path::Path;

use crate::{Result, q_learning::QTable};

/// Port for persisting and loading Q-tables.
///
/// This trait abstracts the storage mechanism, so the engine can be pointed
/// at a file on disk in production and at memory in tests.
///
/// # Examples
///
/// ```no_run
/// use minicheckers::adapters::MsgPackRepository;
/// use minicheckers::ports::QTableRepository;
/// use minicheckers::q_learning::QTable;
/// use std::path::Path;
///
/// let repo = MsgPackRepository::new();
/// repo.save(&QTable::default(), Path::new("q_table.msgpack"))?;
/// let loaded = repo.load(Path::new("q_table.msgpack"))?;
/// assert!(loaded.is_some());
/// # Ok::<(), minicheckers::Error>(())
/// ```
pub trait QTableRepository: Send {
    /// Replace the snapshot stored at `path` with `table`.
    ///
    /// Implementations must not leave a partially written snapshot behind:
    /// after a failed save the previous snapshot is still readable.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be encoded or written.
    fn save(&self, table: &QTable, path: &Path) -> Result<()>;

    /// Load the snapshot stored at `path`.
    ///
    /// Returns `Ok(None)` when nothing has been saved there yet.
    ///
    /// # Errors
    ///
    /// Returns an error if a snapshot exists but cannot be read or decoded.
    fn load(&self, path: &Path) -> Result<Option<QTable>>;
}
