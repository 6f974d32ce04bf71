//! Board representation for the 4×4 game
//!
//! Rows are numbered so the agent starts on row 0 and advances toward row 3,
//! where the human pieces start.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::StateKey;

/// Side length of the square board.
pub const BOARD_SIZE: usize = 4;

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Human,
    Agent,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Human => 'H',
            Cell::Agent => 'A',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' => Some(Cell::Empty),
            'H' | 'h' => Some(Cell::Human),
            'A' | 'a' | 'I' | 'i' => Some(Cell::Agent),
            _ => None,
        }
    }

    /// Owner of the piece in this cell, if any.
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Human => Some(Side::Human),
            Cell::Agent => Some(Side::Agent),
        }
    }
}

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Human,
    Agent,
}

impl Side {
    /// Get the opposing side
    pub fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Agent,
            Side::Agent => Side::Human,
        }
    }

    /// The cell value holding one of this side's pieces
    pub fn piece(self) -> Cell {
        match self {
            Side::Human => Cell::Human,
            Side::Agent => Cell::Agent,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Human => write!(f, "human"),
            Side::Agent => write!(f, "agent"),
        }
    }
}

/// A (row, column) coordinate on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: usize,
    pub col: usize,
}

impl Square {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Square reached by moving `(dr, dc)`, or `None` if it leaves the board.
    pub fn offset(&self, dr: isize, dc: isize) -> Option<Square> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let square = Square::new(row, col);
        square.in_bounds().then_some(square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Mutable game board, owned by the session driving a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Board with no pieces on it
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Starting position: agent pieces on (0,0) and (0,2), human pieces on
    /// (3,1) and (3,3).
    pub fn initial() -> Self {
        let mut board = Self::empty();
        board.set(Square::new(3, 1), Cell::Human);
        board.set(Square::new(3, 3), Cell::Human);
        board.set(Square::new(0, 0), Cell::Agent);
        board.set(Square::new(0, 2), Cell::Agent);
        board
    }

    pub fn from_cells(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Parse a board from 16 cell characters in row-major order.
    ///
    /// Whitespace and `/` row separators are ignored, so both
    /// `"A.A./..../..../.H.H"` and a multi-line grid are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not hold exactly 16 cells or
    /// contains an unknown character.
    pub fn parse(input: &str) -> crate::Result<Self> {
        let chars: Vec<char> = input
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if chars.len() != BOARD_SIZE * BOARD_SIZE {
            return Err(crate::Error::InvalidBoardLength {
                expected: BOARD_SIZE * BOARD_SIZE,
                got: chars.len(),
                context: input.to_string(),
            });
        }

        let mut board = Self::empty();
        for (i, &c) in chars.iter().enumerate() {
            let cell = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: input.to_string(),
            })?;
            board.cells[i / BOARD_SIZE][i % BOARD_SIZE] = cell;
        }
        Ok(board)
    }

    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Cell at `square`; off-board squares read as empty.
    pub fn get(&self, square: Square) -> Cell {
        if square.in_bounds() {
            self.cells[square.row][square.col]
        } else {
            Cell::Empty
        }
    }

    /// Panics on an off-board square; moves go through `rules::apply_move`.
    pub(crate) fn set(&mut self, square: Square, cell: Cell) {
        debug_assert!(square.in_bounds(), "square {square} is off the board");
        self.cells[square.row][square.col] = cell;
    }

    /// Number of pieces `side` has on the board
    pub fn count(&self, side: Side) -> usize {
        let piece = side.piece();
        self.cells.iter().flatten().filter(|&&c| c == piece).count()
    }

    /// Immutable snapshot used as a value-table index
    pub fn state_key(&self) -> StateKey {
        StateKey::from(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl From<StateKey> for Board {
    fn from(state: StateKey) -> Self {
        Self::from_cells(*state.cells())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "   0 1 2 3")?;
        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{row} ")?;
            for cell in cells {
                write!(f, " {}", cell.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_position() {
        let board = Board::initial();
        assert_eq!(board.get(Square::new(0, 0)), Cell::Agent);
        assert_eq!(board.get(Square::new(0, 2)), Cell::Agent);
        assert_eq!(board.get(Square::new(3, 1)), Cell::Human);
        assert_eq!(board.get(Square::new(3, 3)), Cell::Human);
        assert_eq!(board.count(Side::Agent), 2);
        assert_eq!(board.count(Side::Human), 2);
    }

    #[test]
    fn test_parse_matches_initial() {
        let parsed = Board::parse("A.A./..../..../.H.H").unwrap();
        assert_eq!(parsed, Board::initial());

        let grid = "A . A .\n. . . .\n. . . .\n. H . H";
        assert_eq!(Board::parse(grid).unwrap(), Board::initial());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            Board::parse("A.A."),
            Err(crate::Error::InvalidBoardLength { got: 4, .. })
        ));
        assert!(matches!(
            Board::parse("A.A./..../..X./.H.H"),
            Err(crate::Error::InvalidCellCharacter {
                character: 'X',
                position: 10,
                ..
            })
        ));
    }

    #[test]
    fn test_square_offset_stays_on_board() {
        let corner = Square::new(0, 0);
        assert_eq!(corner.offset(-1, 1), None);
        assert_eq!(corner.offset(1, 1), Some(Square::new(1, 1)));
        assert_eq!(Square::new(3, 3).offset(1, -1), None);
        assert_eq!(Square::new(2, 1).offset(-2, 2), Some(Square::new(0, 3)));
    }

    #[test]
    fn test_off_board_reads_empty() {
        let board = Board::initial();
        assert_eq!(board.get(Square::new(4, 0)), Cell::Empty);
    }
}
