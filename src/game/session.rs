//! Game session: turn sequencing between the human and the agent
//!
//! A session owns the board and the agent and runs the alternating-turn
//! protocol:
//!
//! ```text
//!            valid human move            agent move
//! HumanTurn ─────────────────▶ AgentTurn ──────────▶ HumanTurn
//!     │                            │
//!     └──────── terminal ──────────┴──▶ GameOver ──(new game)──▶ HumanTurn
//! ```
//!
//! On every agent turn the previous agent move is scored and fed to the
//! Q-learning update before a new move is chosen. When a game ends the
//! terminal bonus is added to the agent's last (state, action) pair and the
//! table is saved.

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    checkers::{Action, Board, Side, rules},
    config::SessionConfig,
    error::{Error, Result},
    q_learning::QLearningAgent,
    types::StateKey,
};

/// Whose turn it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    HumanTurn,
    AgentTurn,
    GameOver,
}

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The human has no pieces left
    AgentWin,
    /// The agent has no pieces left
    HumanWin,
    /// The round counter reached the configured cap
    RoundLimit,
    /// The agent had pieces but no legal move
    AgentBlocked,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::AgentWin => write!(f, "agent wins"),
            Outcome::HumanWin => write!(f, "human wins"),
            Outcome::RoundLimit => write!(f, "round limit reached"),
            Outcome::AgentBlocked => write!(f, "agent has no legal move"),
        }
    }
}

/// Summary of a finished game
#[derive(Debug, Clone, PartialEq)]
pub struct GameResult {
    pub outcome: Outcome,
    /// Round counter when the game ended
    pub rounds: u32,
    /// Terminal bonus added to the agent's last (state, action) pair, or
    /// `None` if the agent never moved
    pub bonus: Option<f64>,
    pub final_board: Board,
}

/// What happened as a result of a turn
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Human move applied; the agent is to move
    Continue,
    /// Agent move applied; the human is to move
    AgentMoved(Action),
    GameOver(GameResult),
}

/// Running totals across the games of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub games: usize,
    pub agent_wins: usize,
    pub human_wins: usize,
    pub round_limits: usize,
    pub agent_blocked: usize,
}

impl SessionStats {
    fn record(&mut self, outcome: Outcome) {
        self.games += 1;
        match outcome {
            Outcome::AgentWin => self.agent_wins += 1,
            Outcome::HumanWin => self.human_wins += 1,
            Outcome::RoundLimit => self.round_limits += 1,
            Outcome::AgentBlocked => self.agent_blocked += 1,
        }
    }

    pub fn agent_win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.agent_wins as f64 / self.games as f64
        }
    }
}

/// One human playing repeated games against the learning agent.
#[derive(Debug)]
pub struct GameSession {
    agent: QLearningAgent,
    config: SessionConfig,
    board: Board,
    phase: Phase,
    round: u32,
    previous: Option<(StateKey, Action)>,
    stats: SessionStats,
    last_result: Option<GameResult>,
}

impl GameSession {
    /// Start a session with the standard opening position, human to move.
    pub fn new(agent: QLearningAgent, config: SessionConfig) -> Self {
        Self::from_position(agent, config, Board::initial())
    }

    /// Start the first game from `board`, human to move. Later games start
    /// from the standard opening position.
    ///
    /// A board that is already decided puts the session straight into
    /// [`Phase::GameOver`] with an unscored result (no bonus, not counted in
    /// the stats); call [`start_new_game`](Self::start_new_game) to play on.
    pub fn from_position(agent: QLearningAgent, config: SessionConfig, board: Board) -> Self {
        let mut session = Self {
            agent,
            config,
            board,
            phase: Phase::HumanTurn,
            round: 1,
            previous: None,
            stats: SessionStats::default(),
            last_result: None,
        };
        if let Some(outcome) = session.terminal_outcome() {
            debug!("starting position is already decided: {outcome}");
            session.phase = Phase::GameOver;
            session.last_result = Some(GameResult {
                outcome,
                rounds: session.round,
                bonus: None,
                final_board: session.board.clone(),
            });
        }
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_round(&self) -> u32 {
        self.round
    }

    pub fn agent(&self) -> &QLearningAgent {
        &self.agent
    }

    pub fn agent_mut(&mut self) -> &mut QLearningAgent {
        &mut self.agent
    }

    pub fn into_agent(self) -> QLearningAgent {
        self.agent
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn last_result(&self) -> Option<&GameResult> {
        self.last_result.as_ref()
    }

    /// The agent's last move of the current game and the state it was made in
    pub fn pending_transition(&self) -> Option<(StateKey, Action)> {
        self.previous
    }

    /// Whether the current game has ended, either because a side has no
    /// pieces left, the round cap has been reached or the agent was blocked.
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    fn terminal_outcome(&self) -> Option<Outcome> {
        if self.board.count(Side::Human) == 0 {
            Some(Outcome::AgentWin)
        } else if self.board.count(Side::Agent) == 0 {
            Some(Outcome::HumanWin)
        } else if self.round >= self.config.max_rounds {
            Some(Outcome::RoundLimit)
        } else {
            None
        }
    }

    fn expect_phase(&self, expected: Phase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(Error::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    /// Validate and apply a human move.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongPhase`] outside the human's turn and
    /// [`Error::InvalidMove`] for a move that breaks the movement rules; the
    /// board and phase are unchanged in both cases. A storage error is
    /// returned if the move ends the game and the table cannot be saved.
    pub fn apply_human_move(&mut self, action: Action) -> Result<TurnOutcome> {
        self.expect_phase(Phase::HumanTurn)?;
        rules::validate_move(&self.board, Side::Human, action)
            .and_then(|()| rules::apply_move(&mut self.board, action))
            .map_err(|reason| Error::InvalidMove { action, reason })?;
        debug!("human played {action}");

        if let Some(outcome) = self.terminal_outcome() {
            return self.finish_game(outcome).map(TurnOutcome::GameOver);
        }
        self.phase = Phase::AgentTurn;
        Ok(TurnOutcome::Continue)
    }

    /// Run one agent turn: learn from the previous move, then choose and
    /// apply a new one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WrongPhase`] outside the agent's turn, or a storage
    /// error if the turn ends the game and the table cannot be saved.
    pub fn run_agent_turn(&mut self) -> Result<TurnOutcome> {
        self.expect_phase(Phase::AgentTurn)?;

        let state = self.board.state_key();
        if let Some((prev_state, prev_action)) = self.previous {
            let reward = self.config.shaping.step_reward(&prev_state, &state);
            self.agent
                .update_value(Some(&prev_state), Some(prev_action), reward, &state);
        }

        let actions = self.agent.legal_actions(&state);
        let Some(action) = self.agent.choose_action(&state, &actions) else {
            return self
                .finish_game(Outcome::AgentBlocked)
                .map(TurnOutcome::GameOver);
        };

        rules::apply_move(&mut self.board, action)
            .map_err(|reason| Error::InvalidMove { action, reason })?;
        self.previous = Some((state, action));
        self.round += 1;
        self.agent.decay_epsilon();

        if let Some(outcome) = self.terminal_outcome() {
            return self.finish_game(outcome).map(TurnOutcome::GameOver);
        }
        self.phase = Phase::HumanTurn;
        Ok(TurnOutcome::AgentMoved(action))
    }

    /// Reset the board, round counter and pending transition for a new game,
    /// human to move.
    pub fn start_new_game(&mut self) {
        self.board = Board::initial();
        self.round = 1;
        self.phase = Phase::HumanTurn;
        self.previous = None;
    }

    fn finish_game(&mut self, outcome: Outcome) -> Result<GameResult> {
        self.phase = Phase::GameOver;

        let bonus = self.config.terminal.bonus(outcome);
        let applied = self.previous.map(|(state, action)| {
            self.agent.apply_terminal_bonus(state, action, bonus);
            bonus
        });

        self.stats.record(outcome);
        let result = GameResult {
            outcome,
            rounds: self.round,
            bonus: applied,
            final_board: self.board.clone(),
        };
        info!(
            "game {} over after {} rounds: {outcome} (agent {}/{} won, epsilon {:.3})",
            self.stats.games,
            self.round,
            self.stats.agent_wins,
            self.stats.games,
            self.agent.epsilon()
        );
        self.last_result = Some(result.clone());

        let saved = self.agent.persist();
        if self.config.auto_restart {
            self.start_new_game();
        }
        saved?;
        Ok(result)
    }
}
