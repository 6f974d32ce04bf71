//! 4×4 checkers variant: one piece type per side, diagonal steps and single
//! capturing jumps.

pub mod action;
pub mod board;
pub mod rules;

pub use action::Action;
pub use board::{BOARD_SIZE, Board, Cell, Side, Square};
pub use rules::{MoveRejection, actions_for, apply_move, legal_actions, validate_move};
