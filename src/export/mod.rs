//! Export of learned values for analysis outside the game.

mod q_table;

pub use q_table::{QTableExporter, QTableRecord};
