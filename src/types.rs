//! Value types shared between the game and the learning engine.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::checkers::{BOARD_SIZE, Board, Cell, Side, Square};

/// Canonical, immutable snapshot of a board used to index the Q-table.
///
/// Equality and hashing depend only on cell contents, so two boards holding
/// the same pieces always map to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey([[Cell; BOARD_SIZE]; BOARD_SIZE]);

impl StateKey {
    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.0
    }

    /// Cell at `square`; off-board squares read as empty.
    pub fn cell(&self, square: Square) -> Cell {
        if square.in_bounds() {
            self.0[square.row][square.col]
        } else {
            Cell::Empty
        }
    }

    /// Number of pieces `side` has in this state
    pub fn count(&self, side: Side) -> usize {
        let piece = side.piece();
        self.0.iter().flatten().filter(|&&c| c == piece).count()
    }
}

/// Build the state key for a board.
pub fn canonicalize(board: &Board) -> StateKey {
    StateKey(*board.cells())
}

impl From<&Board> for StateKey {
    fn from(board: &Board) -> Self {
        canonicalize(board)
    }
}

impl fmt::Display for StateKey {
    /// Compact row-major form, rows separated by `/` (e.g. `A.A./..../..../.H.H`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
        }
        Ok(())
    }
}

impl FromStr for StateKey {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::parse(s).map(|board| canonicalize(&board))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_equal_contents_give_equal_keys() {
        let first = Board::initial();
        let mut second = Board::empty();
        second.set(Square::new(0, 0), Cell::Agent);
        second.set(Square::new(0, 2), Cell::Agent);
        second.set(Square::new(3, 1), Cell::Human);
        second.set(Square::new(3, 3), Cell::Human);

        assert_eq!(canonicalize(&first), canonicalize(&second));

        let keys: HashSet<StateKey> = [canonicalize(&first), canonicalize(&second)].into();
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn test_key_is_a_snapshot() {
        let mut board = Board::initial();
        let before = canonicalize(&board);
        board.set(Square::new(1, 1), Cell::Agent);
        assert_ne!(before, canonicalize(&board));
        assert_eq!(before, canonicalize(&Board::initial()));
    }

    #[test]
    fn test_display_and_parse() {
        let key = canonicalize(&Board::initial());
        assert_eq!(key.to_string(), "A.A./..../..../.H.H");
        assert_eq!(key.to_string().parse::<StateKey>().unwrap(), key);
    }

    #[test]
    fn test_counts() {
        let key: StateKey = "AA../..../H.../....".parse().unwrap();
        assert_eq!(key.count(Side::Agent), 2);
        assert_eq!(key.count(Side::Human), 1);
    }
}
