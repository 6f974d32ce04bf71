//! Piece moves

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::board::Square;

/// A piece move from one square to another.
///
/// Covers both a simple diagonal step (offset 1 on each axis) and a capturing
/// jump (offset 2 on each axis). Whether the move is legal depends on the
/// board it is applied to; see [`crate::checkers::rules`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    pub from: Square,
    pub to: Square,
}

impl Action {
    /// Build an action from `(fromRow, fromCol, toRow, toCol)`.
    pub const fn new(from_row: usize, from_col: usize, to_row: usize, to_col: usize) -> Self {
        Self {
            from: Square::new(from_row, from_col),
            to: Square::new(to_row, to_col),
        }
    }

    pub const fn between(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    pub fn as_tuple(&self) -> (usize, usize, usize, usize) {
        (self.from.row, self.from.col, self.to.row, self.to.col)
    }

    pub fn row_offset(&self) -> isize {
        self.to.row as isize - self.from.row as isize
    }

    pub fn col_offset(&self) -> isize {
        self.to.col as isize - self.from.col as isize
    }

    /// Diagonal move to an adjacent square
    pub fn is_step(&self) -> bool {
        self.row_offset().abs() == 1 && self.col_offset().abs() == 1
    }

    /// Diagonal move over one square
    pub fn is_jump(&self) -> bool {
        self.row_offset().abs() == 2 && self.col_offset().abs() == 2
    }

    /// Square jumped over, for jumps only.
    pub fn midpoint(&self) -> Option<Square> {
        self.is_jump().then(|| {
            Square::new(
                (self.from.row + self.to.row) / 2,
                (self.from.col + self.to.col) / 2,
            )
        })
    }
}

impl From<(usize, usize, usize, usize)> for Action {
    fn from((from_row, from_col, to_row, to_col): (usize, usize, usize, usize)) -> Self {
        Action::new(from_row, from_col, to_row, to_col)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

impl FromStr for Action {
    type Err = crate::Error;

    /// Parse four coordinates in `fromRow fromCol toRow toCol` order.
    ///
    /// Any non-digit characters act as separators, so `"3 1 2 0"`,
    /// `"3,1 -> 2,0"` and `"3120"` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: Vec<usize> = s
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| d as usize)
            .collect();

        match digits.as_slice() {
            &[from_row, from_col, to_row, to_col] => {
                Ok(Action::new(from_row, from_col, to_row, to_col))
            }
            _ => Err(crate::Error::InvalidActionFormat {
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_and_jump_classification() {
        let step = Action::new(0, 0, 1, 1);
        assert!(step.is_step());
        assert!(!step.is_jump());
        assert_eq!(step.midpoint(), None);

        let jump = Action::new(3, 3, 1, 1);
        assert!(jump.is_jump());
        assert_eq!(jump.midpoint(), Some(Square::new(2, 2)));

        let sideways = Action::new(0, 0, 0, 1);
        assert!(!sideways.is_step());
        assert!(!sideways.is_jump());
    }

    #[test]
    fn test_parse_accepts_common_notations() {
        let expected = Action::new(3, 1, 2, 0);
        assert_eq!("3 1 2 0".parse::<Action>().unwrap(), expected);
        assert_eq!("3,1 -> 2,0".parse::<Action>().unwrap(), expected);
        assert_eq!("3120".parse::<Action>().unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        assert!("3 1 2".parse::<Action>().is_err());
        assert!("3 1 2 0 1".parse::<Action>().is_err());
    }

    #[test]
    fn test_tuple_conversion() {
        let action = Action::from((0, 2, 1, 3));
        assert_eq!(action.as_tuple(), (0, 2, 1, 3));
        assert_eq!(action.to_string(), "(0,2)->(1,3)");
    }
}
