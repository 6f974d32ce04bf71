//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use crate::{checkers::Action, types::StateKey};

/// Q-table mapping (state, action) pairs to Q-values
///
/// Pairs that were never written read as `default_value` (0 unless
/// configured otherwise). The table has no eviction: it grows with every new
/// pair the agent visits.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    q_values: HashMap<(StateKey, Action), f64>,
    default_value: f64,
}

impl QTable {
    /// Create an empty Q-table
    pub fn new(default_value: f64) -> Self {
        Self {
            q_values: HashMap::new(),
            default_value,
        }
    }

    pub fn default_value(&self) -> f64 {
        self.default_value
    }

    /// Get Q-value for a state-action pair, falling back to the default value
    pub fn get(&self, state: &StateKey, action: Action) -> f64 {
        self.q_values
            .get(&(*state, action))
            .copied()
            .unwrap_or(self.default_value)
    }

    /// Whether a value has been stored for the pair
    pub fn contains(&self, state: &StateKey, action: Action) -> bool {
        self.q_values.contains_key(&(*state, action))
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: StateKey, action: Action, value: f64) {
        self.q_values.insert((state, action), value);
    }

    /// Add `delta` to the stored value (default value if unseen). Returns the
    /// new value.
    pub fn add(&mut self, state: StateKey, action: Action, delta: f64) -> f64 {
        let default_value = self.default_value;
        let value = self
            .q_values
            .entry((state, action))
            .or_insert(default_value);
        *value += delta;
        *value
    }

    /// Maximum Q-value over `actions`, or `None` when there are no actions
    pub fn max_q(&self, state: &StateKey, actions: &[Action]) -> Option<f64> {
        actions
            .iter()
            .map(|&action| self.get(state, action))
            .reduce(f64::max)
    }

    /// Select greedy action (highest Q-value) from `actions`
    ///
    /// Ties go to the earliest action in `actions`.
    pub fn greedy_action(&self, state: &StateKey, actions: &[Action]) -> Option<Action> {
        let mut best: Option<(Action, f64)> = None;
        for &action in actions {
            let value = self.get(state, action);
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((action, value)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Temporal difference step toward `target`
    ///
    /// Q(s,a) ← Q(s,a) + α[target - Q(s,a)]
    pub fn td_update(
        &mut self,
        state: StateKey,
        action: Action,
        target: f64,
        learning_rate: f64,
    ) -> f64 {
        let current_q = self.get(&state, action);
        let new_q = current_q + learning_rate * (target - current_q);
        self.set(state, action, new_q);
        new_q
    }

    /// Iterate over stored entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&StateKey, &Action, f64)> {
        self.q_values
            .iter()
            .map(|((state, action), &value)| (state, action, value))
    }

    /// Stored entries sorted by state then action
    pub fn sorted_entries(&self) -> Vec<(StateKey, Action, f64)> {
        let mut entries: Vec<_> = self
            .iter()
            .map(|(state, action, value)| (*state, *action, value))
            .collect();
        entries.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        entries
    }

    pub fn clear(&mut self) {
        self.q_values.clear();
    }

    /// Get total number of Q-values stored
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }
}

impl Default for QTable {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::Board;

    fn initial() -> StateKey {
        Board::initial().state_key()
    }

    #[test]
    fn test_qtable_initialization() {
        let qtable = QTable::default();
        assert_eq!(qtable.get(&initial(), Action::new(0, 0, 1, 1)), 0.0);
        assert!(qtable.is_empty());
    }

    #[test]
    fn test_qtable_set_get() {
        let mut qtable = QTable::default();
        let action = Action::new(0, 2, 1, 3);
        qtable.set(initial(), action, 1.5);
        assert_eq!(qtable.get(&initial(), action), 1.5);
        assert!(qtable.contains(&initial(), action));
        assert_eq!(qtable.len(), 1);
    }

    #[test]
    fn test_add_accumulates_from_default() {
        let mut qtable = QTable::default();
        let action = Action::new(0, 0, 1, 1);
        assert_eq!(qtable.add(initial(), action, 20.0), 20.0);
        assert_eq!(qtable.add(initial(), action, -5.0), 15.0);
    }

    #[test]
    fn test_max_q() {
        let mut qtable = QTable::default();
        let actions = [
            Action::new(0, 0, 1, 1),
            Action::new(0, 2, 1, 1),
            Action::new(0, 2, 1, 3),
        ];
        qtable.set(initial(), actions[0], 0.5);
        qtable.set(initial(), actions[1], 1.5);
        qtable.set(initial(), actions[2], 0.8);

        assert_eq!(qtable.max_q(&initial(), &actions), Some(1.5));
        assert_eq!(qtable.max_q(&initial(), &[]), None);
    }

    #[test]
    fn test_greedy_action() {
        let mut qtable = QTable::default();
        let actions = [
            Action::new(0, 0, 1, 1),
            Action::new(0, 2, 1, 1),
            Action::new(0, 2, 1, 3),
        ];
        qtable.set(initial(), actions[0], -0.5);
        qtable.set(initial(), actions[2], 0.8);

        assert_eq!(qtable.greedy_action(&initial(), &actions), Some(actions[2]));
        assert_eq!(qtable.greedy_action(&initial(), &[]), None);
    }

    #[test]
    fn test_greedy_ties_pick_first() {
        let qtable = QTable::default();
        let actions = [Action::new(0, 2, 1, 3), Action::new(0, 0, 1, 1)];
        assert_eq!(qtable.greedy_action(&initial(), &actions), Some(actions[0]));
    }

    #[test]
    fn test_td_update() {
        let mut qtable = QTable::default();
        let action = Action::new(0, 0, 1, 1);
        // Q = 0.0 + 0.5 * (5.0 - 0.0)
        assert_eq!(qtable.td_update(initial(), action, 5.0, 0.5), 2.5);
        // Q = 2.5 + 0.5 * (5.0 - 2.5)
        assert_eq!(qtable.td_update(initial(), action, 5.0, 0.5), 3.75);
    }

    #[test]
    fn test_sorted_entries_are_ordered() {
        let mut qtable = QTable::default();
        qtable.set(initial(), Action::new(0, 2, 1, 3), 1.0);
        qtable.set(initial(), Action::new(0, 0, 1, 1), 2.0);
        let entries = qtable.sorted_entries();
        assert_eq!(entries[0].1, Action::new(0, 0, 1, 1));
        assert_eq!(entries[1].1, Action::new(0, 2, 1, 3));
    }
}
