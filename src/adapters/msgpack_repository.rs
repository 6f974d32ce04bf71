//! MessagePack implementation of the Q-table repository.
//!
//! This adapter implements the QTableRepository port using rmp_serde for
//! compact binary serialization.

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{BufWriter, ErrorKind, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::{
    Result,
    error::Error,
    ports::QTableRepository,
    q_learning::{QTable, SavedQTable},
};

/// MessagePack-based Q-table repository.
///
/// Snapshots are written to a sibling `.tmp` file first and renamed over the
/// target, so readers only ever see a complete snapshot.
///
/// # Examples
///
/// ```no_run
/// use minicheckers::adapters::MsgPackRepository;
/// use minicheckers::ports::QTableRepository;
/// use std::path::Path;
///
/// let repo = MsgPackRepository;
/// match repo.load(Path::new("q_table.msgpack"))? {
///     Some(table) => println!("{} learned values", table.len()),
///     None => println!("starting fresh"),
/// }
/// # Ok::<(), minicheckers::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("q_table"));
    name.push(".tmp");
    path.with_file_name(name)
}

impl QTableRepository for MsgPackRepository {
    fn save(&self, table: &QTable, path: &Path) -> Result<()> {
        let tmp = temp_path(path);
        let file = File::create(&tmp).map_err(|source| Error::Io {
            operation: format!("create file {tmp:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        let saved = SavedQTable::from_table(table);
        rmp_serde::encode::write(&mut writer, &saved).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize Q-table to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

        writer
            .flush()
            .and_then(|_| writer.get_ref().sync_all())
            .map_err(|source| Error::Io {
                operation: format!("flush file {tmp:?}"),
                source,
            })?;
        drop(writer);

        fs::rename(&tmp, path).map_err(|source| Error::Io {
            operation: format!("move {tmp:?} to {path:?}"),
            source,
        })?;

        info!("saved Q-table with {} entries to {}", table.len(), path.display());
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Option<QTable>> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                debug!("no Q-table snapshot at {}", path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(Error::Io {
                    operation: format!("open file {path:?}"),
                    source,
                });
            }
        };

        let saved: SavedQTable =
            rmp_serde::decode::from_read(&file).map_err(|e| Error::SerializationContext {
                operation: "deserialize Q-table from MessagePack".to_string(),
                message: e.to_string(),
            })?;

        let table = saved.to_table()?;
        info!("loaded Q-table with {} entries from {}", table.len(), path.display());
        Ok(Some(table))
    }
}
