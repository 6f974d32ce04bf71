//! Movement rules: move generation, validation and application
//!
//! Pieces of either side move diagonally in all four directions. A simple
//! step needs an empty adjacent square; a jump needs an opposing piece on the
//! adjacent square and an empty landing square behind it, and removes the
//! jumped piece. Jumps are never chained.

use thiserror::Error;

use super::{
    action::Action,
    board::{Board, Cell, Side, Square},
};
use crate::types::StateKey;

/// Diagonal directions in generation order.
const DIRECTIONS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Why a requested move was refused
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    #[error("square is off the board")]
    OutOfBounds,

    #[error("origin square does not hold one of the mover's pieces")]
    NotOwnPiece,

    #[error("target square is occupied")]
    TargetOccupied,

    #[error("target is neither a diagonal step nor a diagonal jump")]
    NotDiagonal,

    #[error("jump does not pass over an opposing piece")]
    NoPieceToCapture,
}

/// All moves available to `side` in `state`.
///
/// Pieces are visited in row-major order; for each piece the four diagonal
/// directions are tried in a fixed order, emitting the step before the jump.
/// The order is stable, which makes first-maximum tie breaking deterministic.
pub fn actions_for(state: &StateKey, side: Side) -> Vec<Action> {
    let piece = side.piece();
    let enemy = side.opponent().piece();
    let mut actions = Vec::new();

    for (row, cells) in state.cells().iter().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            if cell != piece {
                continue;
            }
            let from = Square::new(row, col);
            for (dr, dc) in DIRECTIONS {
                let Some(adjacent) = from.offset(dr, dc) else {
                    continue;
                };
                match state.cell(adjacent) {
                    Cell::Empty => actions.push(Action::between(from, adjacent)),
                    c if c == enemy => {
                        let landing = from
                            .offset(2 * dr, 2 * dc)
                            .filter(|&landing| state.cell(landing) == Cell::Empty);
                        if let Some(landing) = landing {
                            actions.push(Action::between(from, landing));
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    actions
}

/// Moves available to the agent in `state`. Empty when the agent has no
/// pieces or every piece is blocked.
pub fn legal_actions(state: &StateKey) -> Vec<Action> {
    actions_for(state, Side::Agent)
}

/// Check a move requested for `side` against the current board.
///
/// # Errors
///
/// Returns the first rule the move violates.
pub fn validate_move(board: &Board, side: Side, action: Action) -> Result<(), MoveRejection> {
    if !action.from.in_bounds() || !action.to.in_bounds() {
        return Err(MoveRejection::OutOfBounds);
    }
    if board.get(action.from) != side.piece() {
        return Err(MoveRejection::NotOwnPiece);
    }
    if board.get(action.to) != Cell::Empty {
        return Err(MoveRejection::TargetOccupied);
    }
    if action.is_step() {
        return Ok(());
    }
    match action.midpoint() {
        Some(mid) if board.get(mid) == side.opponent().piece() => Ok(()),
        Some(_) => Err(MoveRejection::NoPieceToCapture),
        None => Err(MoveRejection::NotDiagonal),
    }
}

/// Move the piece on `action.from` and remove any jumped piece.
///
/// Returns the square of the captured piece, if any.
///
/// # Errors
///
/// The move is checked with [`validate_move`] for the side owning the moving
/// piece; a rejected move leaves the board unchanged.
pub fn apply_move(board: &mut Board, action: Action) -> Result<Option<Square>, MoveRejection> {
    if !action.from.in_bounds() || !action.to.in_bounds() {
        return Err(MoveRejection::OutOfBounds);
    }
    let piece = board.get(action.from);
    let side = piece.side().ok_or(MoveRejection::NotOwnPiece)?;
    validate_move(board, side, action)?;

    let captured = action.midpoint();
    if let Some(mid) = captured {
        board.set(mid, Cell::Empty);
    }
    board.set(action.to, piece);
    board.set(action.from, Cell::Empty);
    Ok(captured)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> StateKey {
        Board::parse(s).unwrap().state_key()
    }

    #[test]
    fn test_initial_agent_moves() {
        let actions = legal_actions(&Board::initial().state_key());
        assert_eq!(
            actions,
            vec![
                Action::new(0, 0, 1, 1),
                Action::new(0, 2, 1, 1),
                Action::new(0, 2, 1, 3),
            ]
        );
    }

    #[test]
    fn test_jump_replaces_blocked_step() {
        let state = key("A.../.H../..../....");
        let actions = legal_actions(&state);
        assert!(actions.contains(&Action::new(0, 0, 2, 2)));
        assert!(!actions.contains(&Action::new(0, 0, 1, 1)));
    }

    #[test]
    fn test_jump_needs_empty_landing() {
        let state = key("A.../.H../..H./....");
        assert!(legal_actions(&state).is_empty());
    }

    #[test]
    fn test_own_piece_blocks() {
        let state = key("A.../.A../..../....");
        let actions = legal_actions(&state);
        assert!(!actions.contains(&Action::new(0, 0, 1, 1)));
        assert!(!actions.contains(&Action::new(0, 0, 2, 2)));
    }

    #[test]
    fn test_no_agent_pieces_means_no_actions() {
        assert!(legal_actions(&key("..../..../..../.H.H")).is_empty());
    }

    #[test]
    fn test_pieces_move_backwards_too() {
        let actions = legal_actions(&key("..../..A./..../...."));
        assert_eq!(actions.len(), 4);
        assert!(actions.contains(&Action::new(2, 2, 1, 1)));
    }

    #[test]
    fn test_human_moves_use_same_rules() {
        let actions = actions_for(&Board::initial().state_key(), Side::Human);
        assert_eq!(
            actions,
            vec![
                Action::new(3, 1, 2, 0),
                Action::new(3, 1, 2, 2),
                Action::new(3, 3, 2, 2),
            ]
        );
    }

    #[test]
    fn test_validate_simple_step() {
        let board = Board::initial();
        assert_eq!(
            validate_move(&board, Side::Human, Action::new(3, 1, 2, 0)),
            Ok(())
        );
    }

    #[test]
    fn test_validate_rejections() {
        let board = Board::initial();
        assert_eq!(
            validate_move(&board, Side::Human, Action::new(3, 1, 4, 2)),
            Err(MoveRejection::OutOfBounds)
        );
        assert_eq!(
            validate_move(&board, Side::Human, Action::new(0, 0, 1, 1)),
            Err(MoveRejection::NotOwnPiece)
        );
        assert_eq!(
            validate_move(&board, Side::Human, Action::new(3, 1, 2, 1)),
            Err(MoveRejection::NotDiagonal)
        );
        assert_eq!(
            validate_move(&board, Side::Human, Action::new(3, 1, 1, 3)),
            Err(MoveRejection::NoPieceToCapture)
        );
        assert_eq!(
            validate_move(&board, Side::Human, Action::new(3, 1, 3, 3)),
            Err(MoveRejection::TargetOccupied)
        );
    }

    #[test]
    fn test_apply_rejects_illegal_moves_without_touching_board() {
        let mut board = Board::initial();
        assert_eq!(
            apply_move(&mut board, Action::new(3, 3, 4, 4)),
            Err(MoveRejection::OutOfBounds)
        );
        assert_eq!(
            apply_move(&mut board, Action::new(1, 1, 2, 2)),
            Err(MoveRejection::NotOwnPiece)
        );
        assert_eq!(
            apply_move(&mut board, Action::new(0, 0, 2, 2)),
            Err(MoveRejection::NoPieceToCapture)
        );
        assert_eq!(board, Board::initial());

        assert_eq!(apply_move(&mut board, Action::new(0, 0, 1, 1)), Ok(None));
        assert_eq!(board, Board::parse("..A./.A../..../.H.H").unwrap());
    }

    #[test]
    fn test_apply_jump_captures() {
        let mut board = Board::parse("..../.A../..H./....").unwrap();
        let jump = Action::new(2, 2, 0, 0);
        assert_eq!(validate_move(&board, Side::Human, jump), Ok(()));

        let captured = apply_move(&mut board, jump).unwrap();
        assert_eq!(captured, Some(Square::new(1, 1)));
        assert_eq!(board, Board::parse("H.../..../..../....").unwrap());
    }
}
