pub mod config;
pub mod error;
pub mod loader;
pub mod matching;
pub mod metrics;
pub mod output;
pub mod records;
pub mod runs;

pub use crate::error::{DsResult, ScoreError};
pub use crate::matching::{EventOutcome, MatchingEngine, RunContext};
pub use crate::metrics::{RunOutcome, RunSummary, TargetBreakdown};
