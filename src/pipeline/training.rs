//! Training pipeline for the self-play agent

use serde::{Deserialize, Serialize};

use crate::{Result, ports::Observer, q_learning::QLearningAgent};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of self-play episodes to run
    pub episodes: u64,

    /// Random seed
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            seed: None,
        }
    }
}

/// Result of a training run, counted from X's perspective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes played in this run
    pub total_episodes: u64,

    /// Episodes X won
    pub x_wins: u64,

    /// Episodes O won
    pub o_wins: u64,

    /// Drawn episodes
    pub draws: u64,

    /// X win rate
    pub x_win_rate: f64,

    /// O win rate
    pub o_win_rate: f64,

    /// Draw rate
    pub draw_rate: f64,
}

impl TrainingResult {
    /// Create a new training result
    pub fn new(total_episodes: u64, x_wins: u64, o_wins: u64, draws: u64) -> Self {
        let rate = |count: u64| {
            if total_episodes > 0 {
                count as f64 / total_episodes as f64
            } else {
                0.0
            }
        };

        Self {
            total_episodes,
            x_wins,
            o_wins,
            draws,
            x_win_rate: rate(x_wins),
            o_win_rate: rate(o_wins),
            draw_rate: rate(draws),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Training pipeline driving self-play episodes with observer hooks
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the configured number of self-play episodes.
    ///
    /// Episodes run strictly sequentially; the only mutation is the agent's
    /// own table and episode counter.
    pub fn run(&mut self, agent: &mut QLearningAgent) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            agent.reseed(seed);
        }

        let mut x_wins = 0;
        let mut o_wins = 0;
        let mut draws = 0;

        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        for episode in 0..self.config.episodes {
            let outcome = agent.run_self_play_episode()?;

            if outcome > 0.0 {
                x_wins += 1;
            } else if outcome < 0.0 {
                o_wins += 1;
            } else {
                draws += 1;
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode, outcome)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        Ok(TrainingResult::new(
            self.config.episodes,
            x_wins,
            o_wins,
            draws,
        ))
    }
}
