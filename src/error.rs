//! Error types for the minicheckers crate

use thiserror::Error;

use crate::{
    checkers::{Action, MoveRejection},
    game::Phase,
};

/// Main error type for the minicheckers crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid move {action}: {reason}")]
    InvalidMove {
        action: Action,
        reason: MoveRejection,
    },

    #[error("cannot act during {actual:?}, expected {expected:?}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("cannot parse move '{input}' (expected four coordinates: fromRow fromCol toRow toCol)")]
    InvalidActionFormat { input: String },

    #[error("board string has {got} cells, expected {expected}, in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("unsupported Q-table format version {found} (expected {expected})")]
    UnsupportedFormatVersion { found: u32, expected: u32 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error came from reading or writing the persisted table.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Error::Io { .. }
                | Error::SerializationContext { .. }
                | Error::UnsupportedFormatVersion { .. }
        )
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
