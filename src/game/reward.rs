//! Reward signals for the agent

use serde::{Deserialize, Serialize};

use super::session::Outcome;
use crate::{
    checkers::{BOARD_SIZE, Cell, Side},
    types::StateKey,
};

/// Per-move reward, computed when the agent is about to move again.
///
/// Captures are measured as the net change in the agent's piece count between
/// the state it last moved from and the state it faces now, not attributed to
/// individual moves. Each row holding at least one agent piece adds
/// `(3 - row) * advance_weight`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardShaping {
    /// Reward per unit of net change in the agent's piece count
    pub capture_reward: f64,
    pub advance_weight: f64,
}

impl Default for RewardShaping {
    fn default() -> Self {
        Self {
            capture_reward: 5.0,
            advance_weight: 0.5,
        }
    }
}

impl RewardShaping {
    pub fn step_reward(&self, previous: &StateKey, current: &StateKey) -> f64 {
        let before = previous.count(Side::Agent) as f64;
        let now = current.count(Side::Agent) as f64;
        let material = (now - before) * self.capture_reward;

        let position: f64 = current
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, cells)| cells.contains(&Cell::Agent))
            .map(|(row, _)| (BOARD_SIZE - 1 - row) as f64 * self.advance_weight)
            .sum();

        material + position
    }
}

/// Bonus added to the agent's last (state, action) pair when a game ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalRewards {
    pub agent_win: f64,
    pub human_win: f64,
    pub round_limit: f64,
    pub agent_blocked: f64,
}

impl Default for TerminalRewards {
    fn default() -> Self {
        Self {
            agent_win: 20.0,
            human_win: -20.0,
            round_limit: -20.0,
            agent_blocked: -20.0,
        }
    }
}

impl TerminalRewards {
    pub fn bonus(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::AgentWin => self.agent_win,
            Outcome::HumanWin => self.human_win,
            Outcome::RoundLimit => self.round_limit,
            Outcome::AgentBlocked => self.agent_blocked,
        }
    }
}
