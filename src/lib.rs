//! 4×4 checkers against a tabular Q-learning agent
//!
//! This crate provides:
//! - The board, move generation and move validation for a small checkers
//!   variant (one piece type per side, single capturing jumps)
//! - A Q-learning agent with ε-greedy move selection, epsilon decay and a
//!   persisted Q-table that carries learning across sessions
//! - A game session that sequences human and agent turns, shapes rewards and
//!   applies the terminal win/loss bonus
//! - Storage adapters and a command-line front end

pub mod adapters;
pub mod checkers;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod game;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use checkers::{Action, Board, Cell, Side, Square};
pub use config::{AppConfig, EngineConfig, SessionConfig};
pub use error::{Error, Result};
pub use game::{GameResult, GameSession, Outcome, Phase, TurnOutcome};
pub use q_learning::{QLearningAgent, QTable};
pub use types::{StateKey, canonicalize};
