//! Observer implementations for training pipelines

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{Result, ports::Observer};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: u64,
    o_wins: u64,
    draws: u64,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: u64) -> Result<()> {
        let pb = ProgressBar::new(total_episodes);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (X:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: u64, outcome: f64) -> Result<()> {
        if outcome > 0.0 {
            self.x_wins += 1;
        } else if outcome < 0.0 {
            self.o_wins += 1;
        } else {
            self.draws += 1;
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode + 1);
            pb.set_message(format!(
                "{} O:{} D:{}",
                self.x_wins, self.o_wins, self.draws
            ));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!(
                "{} O:{} D:{}",
                self.x_wins, self.o_wins, self.draws
            ));
        }
        Ok(())
    }
}

/// Metrics observer - Tracks outcome counts during training
pub struct MetricsObserver {
    x_wins: u64,
    o_wins: u64,
    draws: u64,
    total_episodes: u64,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            x_wins: 0,
            o_wins: 0,
            draws: 0,
            total_episodes: 0,
        }
    }

    /// Get current X win rate
    pub fn x_win_rate(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.x_wins as f64 / self.total_episodes as f64
        }
    }

    /// Get current draw rate
    pub fn draw_rate(&self) -> f64 {
        if self.total_episodes == 0 {
            0.0
        } else {
            self.draws as f64 / self.total_episodes as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total_episodes,
            x_wins: self.x_wins,
            o_wins: self.o_wins,
            draws: self.draws,
            x_win_rate: self.x_win_rate(),
            draw_rate: self.draw_rate(),
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: u64,
    pub x_wins: u64,
    pub o_wins: u64,
    pub draws: u64,
    pub x_win_rate: f64,
    pub draw_rate: f64,
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode: u64, outcome: f64) -> Result<()> {
        self.total_episodes += 1;
        if outcome > 0.0 {
            self.x_wins += 1;
        } else if outcome < 0.0 {
            self.o_wins += 1;
        } else {
            self.draws += 1;
        }
        Ok(())
    }
}
