//! Observer port for training instrumentation
//!
//! Observers allow composable data collection during training without
//! coupling the episode loop to specific output formats.

use crate::Result;

/// Observer trait for training runs.
///
/// All methods have no-op defaults so implementations only override the
/// hooks they care about.
pub trait Observer {
    /// Called once before the first episode with the planned episode count.
    fn on_training_start(&mut self, _total_episodes: u64) -> Result<()> {
        Ok(())
    }

    /// Called after each episode with its index and the outcome from X's
    /// perspective (+1.0 win, −1.0 loss, 0.0 draw).
    fn on_episode_end(&mut self, _episode: u64, _outcome: f64) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
