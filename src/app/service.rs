//! Level-aware service facade for external collaborators.
//!
//! One mutex region guards the active agent for every operation: training
//! and persistence (the single mutator) and move inference and status reads
//! are mutually exclusive, so a reader can never observe a table mid-write.

use std::{path::PathBuf, sync::Mutex};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    app::{AgentParams, App, LevelsConfig},
    q_learning::QLearningAgent,
    tictactoe::{Board, Player},
};

/// Introspection snapshot of the active level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    /// Name of the currently selected level
    pub level: String,
    /// Cumulative self-play episodes for this level
    pub total_episodes: u64,
    /// Number of distinct states in the value table
    pub known_states: usize,
    /// Whether a persisted artifact was found when the level was loaded
    pub model_loaded: bool,
}

/// Result of a train-to-target request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrainOutcome {
    /// The requested cumulative target
    pub requested_target: u64,
    /// Episodes actually run by this request (0 when already at target)
    pub episodes_run: u64,
    /// Cumulative episode count after the request
    pub total_episodes: u64,
}

/// The active level and its agent, swapped as a unit on level selection.
struct ActiveAgent {
    level: String,
    path: PathBuf,
    agent: QLearningAgent,
    loaded: bool,
}

/// Collaborator-facing service owning one agent per process.
///
/// External callers (an API layer, a CLI) only ever go through this surface:
/// move inference, idempotent training toward a cumulative episode target,
/// wholesale level switching, and status introspection.
pub struct LevelService {
    app: App,
    levels: LevelsConfig,
    params: AgentParams,
    active: Mutex<ActiveAgent>,
}

impl LevelService {
    /// Create a service with `initial_level` selected and loaded.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownLevel`] if `initial_level` is not
    /// configured, or a validation error for bad agent parameters.
    pub fn new(
        app: App,
        levels: LevelsConfig,
        params: AgentParams,
        initial_level: &str,
    ) -> Result<Self> {
        let path = levels.path_for(initial_level)?.clone();
        let (agent, loaded) = app.load_agent(&params, &path)?;

        Ok(Self {
            app,
            levels,
            params,
            active: Mutex::new(ActiveAgent {
                level: initial_level.to_string(),
                path,
                agent,
                loaded,
            }),
        })
    }

    /// Names of all configured levels.
    pub fn level_names(&self) -> Vec<String> {
        self.levels.names().map(str::to_string).collect()
    }

    /// Suggest a move for `player` on `board`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GameOver`] if the board is already decided,
    /// [`crate::Error::WrongSideToMove`] if it is not `player`'s turn (the
    /// side to move is derived from piece counts), and
    /// [`crate::Error::NoLegalMoves`] as a defensive guard.
    pub fn suggest_move(&self, board: &Board, player: Player) -> Result<usize> {
        let mut active = self.active.lock().unwrap();

        if board.status().is_terminal() {
            return Err(crate::Error::GameOver);
        }

        let to_move = board.player_to_move()?;
        if to_move != player {
            return Err(crate::Error::WrongSideToMove {
                player: player.to_string(),
            });
        }

        active.agent.best_move(board)
    }

    /// Train until the cumulative episode count reaches `target`, then
    /// persist.
    ///
    /// Idempotent: a target at or below the current total runs nothing and
    /// does not touch the artifact.
    pub fn train_to_target(&self, target: u64) -> Result<TrainOutcome> {
        let mut active = self.active.lock().unwrap();

        let current = active.agent.total_episodes();
        if target <= current {
            return Ok(TrainOutcome {
                requested_target: target,
                episodes_run: 0,
                total_episodes: current,
            });
        }

        let episodes = target - current;
        active.agent.train(episodes)?;
        self.app.save_agent(&active.agent, &active.path)?;
        active.loaded = true;

        Ok(TrainOutcome {
            requested_target: target,
            episodes_run: episodes,
            total_episodes: active.agent.total_episodes(),
        })
    }

    /// Switch to a different level, replacing the agent wholesale.
    ///
    /// The current table is discarded (not merged) and the new level's
    /// artifact is loaded from scratch. Selecting the already-active level
    /// reloads it from disk.
    pub fn select_level(&self, name: &str) -> Result<()> {
        let path = self.levels.path_for(name)?.clone();
        let (agent, loaded) = self.app.load_agent(&self.params, &path)?;

        let mut active = self.active.lock().unwrap();
        *active = ActiveAgent {
            level: name.to_string(),
            path,
            agent,
            loaded,
        };

        Ok(())
    }

    /// Report the active level's cumulative episode count and table size.
    pub fn status(&self) -> StatusReport {
        let active = self.active.lock().unwrap();
        StatusReport {
            level: active.level.clone(),
            total_episodes: active.agent.total_episodes(),
            known_states: active.agent.known_states(),
            model_loaded: active.loaded,
        }
    }
}
