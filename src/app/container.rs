//! Dependency injection container for the qoxo application.
//!
//! Centralizes creation and wiring of dependencies: the container owns the
//! snapshot repository and provides factory methods for creating, loading,
//! and saving agents.

use std::{path::Path, sync::Arc};

use super::config::AgentParams;
use crate::{
    Result, adapters::JsonRepository, ports::SnapshotRepository, q_learning::QLearningAgent,
    types::Hyperparameters,
};

/// Application container with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```
/// use qoxo::app::{AgentParams, App};
///
/// let app = App::new();
/// let agent = app.create_agent(&AgentParams::new().with_seed(42))?;
/// # Ok::<(), qoxo::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use qoxo::adapters::InMemoryRepository;
/// use qoxo::app::App;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    /// Repository for snapshot persistence
    repository: Arc<dyn SnapshotRepository + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults: a [`JsonRepository`] and a
    /// non-deterministic RNG.
    pub fn new() -> Self {
        Self {
            repository: Arc::new(JsonRepository::new()),
            default_seed: None,
        }
    }

    /// Create a builder for constructing an app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Get the snapshot repository.
    pub fn repository(&self) -> Arc<dyn SnapshotRepository + Send + Sync> {
        Arc::clone(&self.repository)
    }

    /// Create a new agent from the given parameters.
    ///
    /// Hyperparameters are re-validated so that parameters built from raw
    /// CLI input fail loudly here rather than corrupting the update rule.
    pub fn create_agent(&self, params: &AgentParams) -> Result<QLearningAgent> {
        let hyper = Hyperparameters::new(
            params.hyperparameters.alpha,
            params.hyperparameters.gamma,
            params.hyperparameters.epsilon,
        )?;

        let mut agent = QLearningAgent::new(hyper);
        if let Some(seed) = params.seed.or(self.default_seed) {
            agent = agent.with_seed(seed);
        }

        Ok(agent)
    }

    /// Create an agent and restore it from the given artifact path.
    ///
    /// A missing or corrupt artifact yields a fresh agent with an empty
    /// table; the boolean reports whether a snapshot was applied.
    pub fn load_agent(&self, params: &AgentParams, path: &Path) -> Result<(QLearningAgent, bool)> {
        let mut agent = self.create_agent(params)?;
        let loaded = agent.restore(self.repository.as_ref(), path);
        Ok((agent, loaded))
    }

    /// Persist an agent's table and episode count to the given path.
    pub fn save_agent(&self, agent: &QLearningAgent, path: &Path) -> Result<()> {
        agent.persist(self.repository.as_ref(), path)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing an app with custom dependencies.
///
/// Primarily used for testing to inject in-memory repositories and control
/// randomness.
pub struct AppBuilder {
    repository: Option<Arc<dyn SnapshotRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    /// Create a new app builder.
    pub fn new() -> Self {
        Self {
            repository: None,
            default_seed: None,
        }
    }

    /// Set a custom snapshot repository.
    pub fn with_repository<R: SnapshotRepository + Send + Sync + 'static>(
        mut self,
        repository: R,
    ) -> Self {
        self.repository = Some(Arc::new(repository));
        self
    }

    /// Set a default random seed for all agents created by this container.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app, defaulting to a [`JsonRepository`] when no repository
    /// was injected.
    pub fn build(self) -> App {
        App {
            repository: self
                .repository
                .unwrap_or_else(|| Arc::new(JsonRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
