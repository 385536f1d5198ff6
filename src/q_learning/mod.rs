//! Tabular Q-learning
//!
//! This module implements the temporal difference learning core: an exact,
//! per-state-action value table, an ε-greedy self-play agent, and the
//! snapshot format used to persist a trained table.
//!
//! The update rule is standard one-step Q-learning with no eligibility trace
//! and no function approximation:
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//! ```
//!
//! ## Usage Example
//!
//! ```
//! use qoxo::q_learning::QLearningAgent;
//! use qoxo::types::Hyperparameters;
//!
//! let mut agent = QLearningAgent::new(Hyperparameters::default()).with_seed(42);
//! agent.train(100)?;
//! assert_eq!(agent.total_episodes(), 100);
//! # Ok::<(), qoxo::Error>(())
//! ```

pub mod agent;
pub mod q_table;
pub mod serialization;

// Public re-exports
pub use agent::QLearningAgent;
pub use q_table::QTable;
pub use serialization::TableSnapshot;
