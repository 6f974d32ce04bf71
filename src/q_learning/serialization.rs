//! Serialization support for the Q-table snapshot.

use serde::{Deserialize, Serialize};

use crate::{
    checkers::Action,
    error::{Error, Result},
    q_learning::q_table::QTable,
    types::StateKey,
};

/// One stored (state, action) value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QEntry {
    pub state: StateKey,
    pub action: Action,
    pub value: f64,
}

/// Versioned, serializable form of a [`QTable`].
///
/// Entries are kept sorted so identical tables encode to identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedQTable {
    pub version: u32,
    pub default_value: f64,
    pub entries: Vec<QEntry>,
}

impl SavedQTable {
    pub const VERSION: u32 = 1;

    pub fn from_table(table: &QTable) -> Self {
        Self {
            version: Self::VERSION,
            default_value: table.default_value(),
            entries: table
                .sorted_entries()
                .into_iter()
                .map(|(state, action, value)| QEntry {
                    state,
                    action,
                    value,
                })
                .collect(),
        }
    }

    pub fn to_table(&self) -> Result<QTable> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedFormatVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }

        let mut table = QTable::new(self.default_value);
        for entry in &self.entries {
            table.set(entry.state, entry.action, entry.value);
        }
        Ok(table)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec(self).map_err(|e| Error::SerializationContext {
            operation: "serialize Q-table to MessagePack".to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize Q-table from MessagePack".to_string(),
            message: e.to_string(),
        })
    }
}
