//! Configuration types for agent creation and level selection.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::types::Hyperparameters;

/// Configuration for creating a Q-learning agent.
///
/// # Examples
///
/// ```
/// use qoxo::app::AgentParams;
/// use qoxo::types::Hyperparameters;
///
/// let params = AgentParams::new()
///     .with_hyperparameters(Hyperparameters::new(0.5, 0.9, 0.1).unwrap())
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct AgentParams {
    /// Learning rate, discount factor, and exploration rate
    pub hyperparameters: Hyperparameters,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentParams {
    /// Create agent parameters with default hyperparameters and no seed.
    pub fn new() -> Self {
        Self {
            hyperparameters: Hyperparameters::default(),
            seed: None,
        }
    }

    /// Set the hyperparameters.
    pub fn with_hyperparameters(mut self, hyperparameters: Hyperparameters) -> Self {
        self.hyperparameters = hyperparameters;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for AgentParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Named difficulty levels mapped to their persisted artifact paths.
///
/// A level is nothing more than a snapshot file: selecting a different level
/// means pointing the agent at a different artifact and reloading it
/// wholesale. Tables are never merged across levels.
#[derive(Debug, Clone, Default)]
pub struct LevelsConfig {
    levels: BTreeMap<String, PathBuf>,
}

impl LevelsConfig {
    /// Create an empty level configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration mapping each name to `<dir>/<name>.json`.
    pub fn from_dir(dir: &Path, names: &[&str]) -> Self {
        let mut config = Self::new();
        for &name in names {
            config = config.with_level(name, dir.join(format!("{name}.json")));
        }
        config
    }

    /// Add a level with an explicit artifact path.
    pub fn with_level(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.levels.insert(name.into(), path.into());
        self
    }

    /// Resolve the artifact path for a level.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownLevel`] for unconfigured names.
    pub fn path_for(&self, name: &str) -> Result<&PathBuf, crate::Error> {
        self.levels
            .get(name)
            .ok_or_else(|| crate::Error::UnknownLevel {
                name: name.to_string(),
            })
    }

    /// Iterate over configured level names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.levels.keys().map(String::as_str)
    }

    /// Number of configured levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Check whether no levels are configured.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
