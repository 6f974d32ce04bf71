//! Turn and reward sequencing for human-versus-agent games.

pub mod reward;
pub mod session;

pub use reward::{RewardShaping, TerminalRewards};
pub use session::{GameResult, GameSession, Outcome, Phase, SessionStats, TurnOutcome};
