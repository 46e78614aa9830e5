//! Batch simulation of random disaster scenarios.
//!
//! Draws input triples from a seeded RNG, scores each one with a
//! [`PrioritySystem`](crate::PrioritySystem) and bands the score into a
//! [`PriorityLevel`]. Scoring failures are handled by the configured
//! [`FallbackPolicy`], never inside the engine.

mod config;
mod runner;
mod summary;
mod types;

pub use config::{FallbackPolicy, ScenarioConfig};
pub use runner::{BatchReport, ScenarioBatch};
pub use summary::{ColumnSummary, Summary};
pub use types::{PriorityLevel, ScenarioRecord};
