//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use crate::types::StateKey;

/// Q-table mapping state keys to per-move value estimates
///
/// The table is a nested associative container: state key → (move → value).
/// Rows appear lazily through [`QTable::ensure`] and are never removed, so
/// the table grows monotonically during training.
#[derive(Debug, Clone)]
pub struct QTable {
    /// Q-values: state key -> (move position -> value)
    values: HashMap<StateKey, HashMap<usize, f64>>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create a new empty Q-table
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            values: HashMap::new(),
            learning_rate,
            discount_factor,
        }
    }

    /// Lazily initialize the row for `state` with 0.0 for every action not
    /// already present. Existing values are never overwritten, so calling
    /// this repeatedly with the same arguments is a no-op.
    pub fn ensure(&mut self, state: &StateKey, actions: &[usize]) {
        let row = self.values.entry(state.clone()).or_default();
        for &action in actions {
            row.entry(action).or_insert(0.0);
        }
    }

    /// Get the value for a state-action pair, defaulting to 0.0
    pub fn get(&self, state: &StateKey, action: usize) -> f64 {
        self.values
            .get(state)
            .and_then(|row| row.get(&action))
            .copied()
            .unwrap_or(0.0)
    }

    /// Check whether any values are recorded for a state
    pub fn contains_state(&self, state: &StateKey) -> bool {
        self.values.contains_key(state)
    }

    /// Maximum value over the given actions in a state
    pub fn max_value(&self, state: &StateKey, actions: &[usize]) -> f64 {
        actions
            .iter()
            .map(|&action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// The subset of `actions` that have a recorded value in `state`
    pub fn known_actions(&self, state: &StateKey, actions: &[usize]) -> Vec<usize> {
        match self.values.get(state) {
            Some(row) => actions
                .iter()
                .copied()
                .filter(|action| row.contains_key(action))
                .collect(),
            None => Vec::new(),
        }
    }

    /// All actions among `actions` tied at the maximum value.
    ///
    /// Returns an empty vector only when `actions` is empty; unseen actions
    /// participate with their default value of 0.0.
    pub fn best_actions(&self, state: &StateKey, actions: &[usize]) -> Vec<usize> {
        let max = actions
            .iter()
            .map(|&action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max);

        actions
            .iter()
            .copied()
            .filter(|&action| self.get(state, action) == max)
            .collect()
    }

    /// One-step Q-learning update
    ///
    /// `next` carries the successor state key and its legal moves, or `None`
    /// for a terminal transition. The future value is 0.0 when the successor
    /// is absent or has no legal moves; otherwise it is the maximum table
    /// value over the successor's legal moves, with the successor row lazily
    /// initialized first.
    pub fn update(
        &mut self,
        state: &StateKey,
        action: usize,
        reward: f64,
        next: Option<(&StateKey, &[usize])>,
    ) {
        self.ensure(state, &[action]);

        let future_value = match next {
            Some((next_state, next_actions)) if !next_actions.is_empty() => {
                self.ensure(next_state, next_actions);
                self.max_value(next_state, next_actions)
            }
            _ => 0.0,
        };

        let current = self.get(state, action);
        let target = reward + self.discount_factor * future_value;
        let updated = current + self.learning_rate * (target - current);

        if let Some(row) = self.values.get_mut(state) {
            row.insert(action, updated);
        }
    }

    /// Number of distinct known states
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over (state, row) pairs
    pub fn rows(&self) -> impl Iterator<Item = (&StateKey, &HashMap<usize, f64>)> {
        self.values.iter()
    }

    /// Insert a full row, merging with any existing entries
    pub fn insert_row(&mut self, state: StateKey, row: HashMap<usize, f64>) {
        self.values.entry(state).or_default().extend(row);
    }

    /// Remove all values
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> StateKey {
        StateKey::parse(s).expect("valid state key")
    }

    #[test]
    fn test_ensure_initializes_missing_actions() {
        let mut table = QTable::new(0.5, 0.9);
        let state = key(".........");

        table.ensure(&state, &[0, 4, 8]);
        assert_eq!(table.get(&state, 0), 0.0);
        assert_eq!(table.get(&state, 4), 0.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let mut table = QTable::new(0.5, 0.9);
        let state = key(".........");

        table.ensure(&state, &[0, 1]);
        table.update(&state, 0, 1.0, None);
        let value = table.get(&state, 0);

        table.ensure(&state, &[0, 1]);
        assert_eq!(table.get(&state, 0), value);
    }

    #[test]
    fn test_best_actions_collects_ties() {
        let mut table = QTable::new(0.5, 0.9);
        let state = key(".........");

        table.ensure(&state, &[0, 1, 2]);
        table.update(&state, 1, 1.0, None);

        assert_eq!(table.best_actions(&state, &[0, 1, 2]), vec![1]);
        assert_eq!(table.best_actions(&state, &[0, 2]), vec![0, 2]);
    }

    #[test]
    fn test_update_bootstraps_from_next_state() {
        let mut table = QTable::new(0.5, 0.9);
        let state = key(".........");
        let next = key("X........");

        table.ensure(&next, &[1, 2]);
        table.update(&next, 2, 1.0, None);
        let next_max = table.get(&next, 2);

        table.update(&state, 0, 0.0, Some((&next, &[1, 2][..])));

        // Q(s,0) = 0.0 + 0.5 * (0.0 + 0.9 * next_max - 0.0)
        let expected = 0.5 * 0.9 * next_max;
        assert!((table.get(&state, 0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_update_terminal_has_zero_future() {
        let mut table = QTable::new(0.5, 0.9);
        let state = key(".........");

        table.update(&state, 4, 1.0, None);
        assert!((table.get(&state, 4) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_known_actions_filters_unseen() {
        let mut table = QTable::new(0.5, 0.9);
        let state = key(".........");

        table.ensure(&state, &[0, 1]);
        assert_eq!(table.known_actions(&state, &[0, 1, 2]), vec![0, 1]);
        assert_eq!(table.known_actions(&key("X........"), &[0, 1]), Vec::<usize>::new());
    }
}
