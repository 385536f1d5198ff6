//! Training pipeline
//!
//! Drives self-play episodes and notifies observers, keeping the episode
//! loop decoupled from progress display and metrics collection.

pub mod observers;
pub mod training;

pub use observers::{MetricsObserver, MetricsSummary, ProgressObserver};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};
