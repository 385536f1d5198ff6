//! Application layer: configuration, dependency injection, and the
//! collaborator-facing service.
//!
//! The [`App`] container owns infrastructure dependencies (the snapshot
//! repository) and provides factory methods for creating and loading agents.
//! [`LevelService`] wraps one explicitly owned agent behind a single mutex
//! and exposes the narrow surface external callers use: move inference,
//! idempotent training toward a target, wholesale level switching, and
//! status introspection.

pub mod config;
pub mod container;
pub mod service;

pub use config::{AgentParams, LevelsConfig};
pub use container::{App, AppBuilder};
pub use service::{LevelService, StatusReport, TrainOutcome};
