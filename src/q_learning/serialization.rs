//! Snapshot serialization for trained agents.
//!
//! The persisted artifact is a JSON document with the cumulative episode
//! count and the value table, keyed by state key with string-encoded move
//! positions:
//!
//! ```json
//! { "total_episodes": 1000, "Q": { "XO.......": { "4": 0.45 } } }
//! ```

use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    ports::SnapshotRepository,
    q_learning::agent::QLearningAgent,
    types::StateKey,
};

/// Serialized form of a trained value table.
///
/// Move keys are string-encoded because the document's inner mapping keys
/// must be textual. `BTreeMap` keeps the serialized document stable across
/// runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableSnapshot {
    #[serde(default)]
    pub total_episodes: u64,
    #[serde(rename = "Q", default)]
    pub q: BTreeMap<String, BTreeMap<String, f64>>,
}

impl TableSnapshot {
    /// Capture the current state of an agent
    pub fn from_agent(agent: &QLearningAgent) -> Self {
        let mut q = BTreeMap::new();
        for (state, row) in agent.q_table().rows() {
            let encoded: BTreeMap<String, f64> = row
                .iter()
                .map(|(&action, &value)| (action.to_string(), value))
                .collect();
            q.insert(state.as_str().to_string(), encoded);
        }

        Self {
            total_episodes: agent.total_episodes(),
            q,
        }
    }

    /// Apply this snapshot to an agent, replacing its table and counter.
    ///
    /// Recovery is partial by design: rows with an invalid state key and
    /// entries whose move key does not parse back to an integer are skipped
    /// rather than failing the whole load.
    pub fn apply_to(self, agent: &mut QLearningAgent) {
        agent.reset();
        agent.set_total_episodes(self.total_episodes);

        for (state_str, row) in self.q {
            let Ok(state) = StateKey::parse(&state_str) else {
                continue;
            };

            let decoded: std::collections::HashMap<usize, f64> = row
                .into_iter()
                .filter_map(|(action_str, value)| {
                    action_str.parse::<usize>().ok().map(|action| (action, value))
                })
                .collect();

            if !decoded.is_empty() {
                agent.q_table_mut().insert_row(state, decoded);
            }
        }
    }
}

impl QLearningAgent {
    /// Persist the current table and episode count through a repository
    pub fn persist(&self, repository: &dyn SnapshotRepository, path: &Path) -> Result<()> {
        repository.save(&TableSnapshot::from_agent(self), path)
    }

    /// Restore the table and episode count from a repository.
    ///
    /// A missing or corrupt artifact silently resets the agent to an empty
    /// table and zero episodes rather than failing. This trades data loss
    /// for availability: a re-trainable agent stays usable even when its
    /// persisted state is gone. Returns whether a snapshot was applied.
    pub fn restore(&mut self, repository: &dyn SnapshotRepository, path: &Path) -> bool {
        match repository.load(path) {
            Ok(snapshot) => {
                snapshot.apply_to(self);
                true
            }
            Err(_) => {
                self.reset();
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Hyperparameters;

    #[test]
    fn test_snapshot_roundtrip_preserves_table() {
        let mut agent = QLearningAgent::new(Hyperparameters::default()).with_seed(5);
        agent.train(20).expect("training should succeed");
        assert!(agent.known_states() > 0);

        let snapshot = TableSnapshot::from_agent(&agent);
        let mut restored = QLearningAgent::new(Hyperparameters::default());
        snapshot.apply_to(&mut restored);

        assert_eq!(restored.total_episodes(), agent.total_episodes());
        assert_eq!(restored.known_states(), agent.known_states());
        for (state, row) in agent.q_table().rows() {
            for (&action, &value) in row {
                assert_eq!(restored.q_table().get(state, action), value);
            }
        }
    }

    #[test]
    fn test_apply_skips_unparsable_move_keys() {
        let mut snapshot = TableSnapshot::default();
        let mut row = BTreeMap::new();
        row.insert("4".to_string(), 0.25);
        row.insert("not-a-move".to_string(), 0.75);
        snapshot.q.insert(".........".to_string(), row);
        snapshot.total_episodes = 3;

        let mut agent = QLearningAgent::new(Hyperparameters::default());
        snapshot.apply_to(&mut agent);

        assert_eq!(agent.total_episodes(), 3);
        let state = StateKey::parse(".........").unwrap();
        assert_eq!(agent.q_table().get(&state, 4), 0.25);
        assert_eq!(agent.q_table().known_actions(&state, &[0, 4]), vec![4]);
    }

    #[test]
    fn test_apply_skips_invalid_state_keys() {
        let mut snapshot = TableSnapshot::default();
        let mut row = BTreeMap::new();
        row.insert("0".to_string(), 1.0);
        snapshot.q.insert("bogus".to_string(), row);

        let mut agent = QLearningAgent::new(Hyperparameters::default());
        snapshot.apply_to(&mut agent);

        assert_eq!(agent.known_states(), 0);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut agent = QLearningAgent::new(Hyperparameters::default()).with_seed(9);
        agent.train(5).expect("training should succeed");

        let json = serde_json::to_value(TableSnapshot::from_agent(&agent))
            .expect("snapshot should serialize");
        assert!(json.get("total_episodes").is_some());
        assert!(json.get("Q").is_some());
    }
}
