pub mod benchmark;
pub mod climber;
pub mod config;
pub mod control;
pub mod error;
pub mod launcher;
pub mod objective;
pub mod position;
pub mod rng;
pub mod tracker;

// Re-export commonly used types for convenience
pub use benchmark::BenchmarkFunction;
pub use config::RunConfiguration;
pub use control::SearchControl;
pub use error::{ClimbError, Result, ResultExt};
pub use launcher::{ClimbLauncher, RunHandle, RunSummary};
pub use position::{BestRecord, Position};
