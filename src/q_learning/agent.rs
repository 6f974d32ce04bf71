//! Q-learning agent
//!
//! The agent owns the Q-table, picks moves ε-greedily, applies the
//! Q-learning update after each of its moves and keeps the table in a
//! repository between runs.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    checkers::{Action, rules},
    config::EngineConfig,
    error::Result,
    ports::QTableRepository,
    q_learning::q_table::QTable,
    types::StateKey,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning agent (off-policy TD control)
///
/// Learns by moving Q(s,a) toward `r + γ max_a' Q(s',a')`, where the maximum
/// runs over the agent's legal actions in the state it faces next.
pub struct QLearningAgent {
    q_table: QTable,
    learning_rate: f64,
    discount_factor: f64,
    epsilon: f64,
    epsilon_decay: f64,
    min_epsilon: f64,
    rng: StdRng,
    repository: Box<dyn QTableRepository>,
    table_path: PathBuf,
}

impl QLearningAgent {
    /// Create an agent with an empty Q-table.
    ///
    /// Nothing is read from `repository` until [`restore`](Self::restore) is
    /// called; use [`open`](Self::open) to construct and restore in one step.
    pub fn new<R>(config: &EngineConfig, repository: R, table_path: impl Into<PathBuf>) -> Self
    where
        R: QTableRepository + 'static,
    {
        Self {
            q_table: QTable::new(config.default_value),
            learning_rate: config.learning_rate,
            discount_factor: config.discount_factor,
            epsilon: config.epsilon,
            epsilon_decay: config.epsilon_decay,
            min_epsilon: config.min_epsilon,
            rng: build_rng(config.seed),
            repository: Box::new(repository),
            table_path: table_path.into(),
        }
    }

    /// Create an agent and load its previous Q-table, if one was saved.
    ///
    /// A snapshot that cannot be read is logged and ignored; the agent then
    /// starts from an empty table. Call [`restore`](Self::restore) directly
    /// to get the error instead.
    pub fn open<R>(config: &EngineConfig, repository: R, table_path: impl Into<PathBuf>) -> Self
    where
        R: QTableRepository + 'static,
    {
        let mut agent = Self::new(config, repository, table_path);
        match agent.restore() {
            Ok(true) => {}
            Ok(false) => info!(
                "no previous Q-table at {}, starting from scratch",
                agent.table_path.display()
            ),
            Err(e) => warn!(
                "could not load Q-table from {}, starting from scratch: {e}",
                agent.table_path.display()
            ),
        }
        agent
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Replace the random source used for exploration.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Legal agent moves in `state`.
    pub fn legal_actions(&self, state: &StateKey) -> Vec<Action> {
        rules::legal_actions(state)
    }

    /// ε-greedy action selection
    ///
    /// With probability ε a uniformly random action is returned; otherwise
    /// the action with the highest Q-value, ties going to the earliest action
    /// in `valid_actions`. Returns `None` when `valid_actions` is empty.
    pub fn choose_action(&mut self, state: &StateKey, valid_actions: &[Action]) -> Option<Action> {
        if valid_actions.is_empty() {
            return None;
        }

        let explore = self.rng.random::<f64>() < self.epsilon;
        let action = if explore {
            valid_actions.choose(&mut self.rng).copied()
        } else {
            self.q_table.greedy_action(state, valid_actions)
        };

        if let Some(action) = action {
            debug!(
                "{} {action} in {state} (Q = {:.3}, epsilon = {:.3})",
                if explore { "explore" } else { "exploit" },
                self.q_table.get(state, action),
                self.epsilon
            );
        }
        action
    }

    /// Q-learning update for the transition `prev_state --action--> next_state`.
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// The maximum is 0 when the agent has no legal action in `next_state`.
    /// Does nothing, and returns `None`, when either the previous state or
    /// the action is missing (the first agent move of a game).
    pub fn update_value(
        &mut self,
        prev_state: Option<&StateKey>,
        action: Option<Action>,
        reward: f64,
        next_state: &StateKey,
    ) -> Option<f64> {
        let (prev_state, action) = prev_state.zip(action)?;

        let next_actions = self.legal_actions(next_state);
        let max_future = self.q_table.max_q(next_state, &next_actions).unwrap_or(0.0);
        let target = reward + self.discount_factor * max_future;
        let new_q = self
            .q_table
            .td_update(*prev_state, action, target, self.learning_rate);

        debug!("Q({prev_state}, {action}) <- {new_q:.4} (reward {reward:.2}, target {target:.4})");
        Some(new_q)
    }

    /// Add a terminal bonus straight to the stored value of the final
    /// (state, action) pair, without bootstrapping. Returns the new value.
    pub fn apply_terminal_bonus(&mut self, state: StateKey, action: Action, bonus: f64) -> f64 {
        let new_q = self.q_table.add(state, action, bonus);
        debug!("terminal bonus {bonus:+} on Q({state}, {action}) -> {new_q:.4}");
        new_q
    }

    /// Multiply ε by the decay factor, never going below the floor.
    pub fn decay_epsilon(&mut self) -> f64 {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.min_epsilon);
        self.epsilon
    }

    /// Write the whole Q-table to the repository.
    ///
    /// # Errors
    ///
    /// Returns the storage error; learning progress since the last
    /// successful save is then only held in memory.
    pub fn persist(&self) -> Result<()> {
        self.repository.save(&self.q_table, &self.table_path)
    }

    /// Replace the Q-table with the saved snapshot.
    ///
    /// Returns `Ok(false)`, leaving the table untouched, when no snapshot
    /// exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if a snapshot exists but cannot be read.
    pub fn restore(&mut self) -> Result<bool> {
        match self.repository.load(&self.table_path)? {
            Some(table) => {
                self.q_table = table;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn min_epsilon(&self) -> f64 {
        self.min_epsilon
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Current estimate for a pair (default value if never visited)
    pub fn value(&self, state: &StateKey, action: Action) -> f64 {
        self.q_table.get(state, action)
    }

    pub fn table(&self) -> &QTable {
        &self.q_table
    }

    /// Number of stored (state, action) values
    pub fn table_len(&self) -> usize {
        self.q_table.len()
    }

    pub fn table_mut(&mut self) -> &mut QTable {
        &mut self.q_table
    }

    pub fn table_path(&self) -> &Path {
        &self.table_path
    }
}

impl fmt::Debug for QLearningAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QLearningAgent")
            .field("entries", &self.q_table.len())
            .field("learning_rate", &self.learning_rate)
            .field("discount_factor", &self.discount_factor)
            .field("epsilon", &self.epsilon)
            .field("epsilon_decay", &self.epsilon_decay)
            .field("min_epsilon", &self.min_epsilon)
            .field("table_path", &self.table_path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::InMemoryRepository, checkers::Board};

    fn agent_with(config: EngineConfig) -> QLearningAgent {
        QLearningAgent::new(&config, InMemoryRepository::new(), "q_table").with_seed(7)
    }

    #[test]
    fn test_choose_action_empty_is_none() {
        let mut agent = agent_with(EngineConfig::default());
        let state = Board::initial().state_key();
        assert_eq!(agent.choose_action(&state, &[]), None);
    }

    #[test]
    fn test_greedy_when_epsilon_zero() {
        let mut agent = agent_with(EngineConfig::default().with_epsilon(0.0));
        let state = Board::initial().state_key();
        let actions = agent.legal_actions(&state);
        agent.table_mut().set(state, actions[2], 1.0);

        for _ in 0..20 {
            assert_eq!(agent.choose_action(&state, &actions), Some(actions[2]));
        }
    }

    #[test]
    fn test_explores_when_epsilon_one() {
        let mut agent = agent_with(EngineConfig::default().with_epsilon(1.0));
        let state = Board::initial().state_key();
        let actions = agent.legal_actions(&state);
        agent.table_mut().set(state, actions[0], 100.0);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let action = agent.choose_action(&state, &actions).unwrap();
            assert!(actions.contains(&action));
            seen.insert(action);
        }
        assert_eq!(seen.len(), actions.len());
    }

    #[test]
    fn test_update_without_previous_is_noop() {
        let mut agent = agent_with(EngineConfig::default());
        let state = Board::initial().state_key();
        assert_eq!(agent.update_value(None, None, 5.0, &state), None);
        assert_eq!(
            agent.update_value(None, Some(Action::new(0, 0, 1, 1)), 5.0, &state),
            None
        );
        assert_eq!(agent.update_value(Some(&state), None, 5.0, &state), None);
        assert!(agent.table().is_empty());
    }

    #[test]
    fn test_update_bootstraps_from_next_state() {
        let config = EngineConfig::default()
            .with_learning_rate(0.5)
            .with_discount_factor(0.9);
        let mut agent = agent_with(config);
        let prev = Board::initial().state_key();
        let action = Action::new(0, 0, 1, 1);
        let next: StateKey = "..A./.A../..../.H.H".parse().unwrap();
        agent.table_mut().set(next, Action::new(0, 2, 1, 3), 2.0);

        // 0 + 0.5 * (1 + 0.9 * 2 - 0)
        let updated = agent.update_value(Some(&prev), Some(action), 1.0, &next).unwrap();
        assert!((updated - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_update_with_no_future_actions() {
        let config = EngineConfig::default()
            .with_learning_rate(0.5)
            .with_discount_factor(0.9);
        let mut agent = agent_with(config);
        let prev = Board::initial().state_key();
        let action = Action::new(0, 0, 1, 1);
        let next: StateKey = "..../..../..../.H.H".parse().unwrap();

        let updated = agent.update_value(Some(&prev), Some(action), -4.0, &next).unwrap();
        assert_eq!(updated, -2.0);
    }

    #[test]
    fn test_decay_respects_floor() {
        let mut agent = agent_with(
            EngineConfig::default()
                .with_epsilon(0.5)
                .with_epsilon_decay(0.5)
                .with_min_epsilon(0.1),
        );
        assert_eq!(agent.decay_epsilon(), 0.25);
        assert_eq!(agent.decay_epsilon(), 0.125);
        assert_eq!(agent.decay_epsilon(), 0.1);
        for _ in 0..100 {
            assert_eq!(agent.decay_epsilon(), 0.1);
        }
    }

    #[test]
    fn test_terminal_bonus_adds() {
        let mut agent = agent_with(EngineConfig::default());
        let state = Board::initial().state_key();
        let action = Action::new(0, 0, 1, 1);
        agent.table_mut().set(state, action, 1.5);
        assert_eq!(agent.apply_terminal_bonus(state, action, 20.0), 21.5);
        assert_eq!(agent.value(&state, action), 21.5);
    }

    #[test]
    fn test_restore_without_snapshot_keeps_table() {
        let mut agent = agent_with(EngineConfig::default());
        let state = Board::initial().state_key();
        agent.table_mut().set(state, Action::new(0, 0, 1, 1), 3.0);
        assert!(!agent.restore().unwrap());
        assert_eq!(agent.table().len(), 1);
    }

    #[test]
    fn test_open_falls_back_on_corrupt_snapshot() {
        let repo = InMemoryRepository::new();
        repo.insert_raw(Path::new("q_table"), vec![0xc1, 0xc1]);

        let agent = QLearningAgent::open(&EngineConfig::default(), repo.clone(), "q_table");
        assert!(agent.table().is_empty());

        let mut direct = QLearningAgent::new(&EngineConfig::default(), repo, "q_table");
        assert!(direct.restore().is_err());
    }
}
