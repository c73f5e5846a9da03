//! Convenient re-exports of commonly used types and functions.
//!
//! This module re-exports the most commonly used items from the emberweave
//! crate, allowing users to import them all with a single
//! `use emberweave::prelude::*` statement.

pub use crate::core::acceptance::{hard_phase_accepts, metropolis, soft_phase_accepts, Phase};
pub use crate::core::annealer::{Annealer, Solution};
pub use crate::core::config::{AnnealerConfig, ConfigError};
pub use crate::core::constraint::{violation_count, Constraint, ConstraintKind};
pub use crate::core::fitness::{Evaluation, FitnessEvaluator};
pub use crate::core::moves::MoveGenerator;
pub use crate::core::progress::{
    LogLevel, LogOptions, LogSink, OperatorReport, ProgressRecord, ProgressSink,
};
pub use crate::core::selector::{OperatorSelector, OperatorStats};
pub use crate::core::state::State;
pub use crate::rng::seeded_rng::seeded_rng;

// Re-export commonly used external types
pub use rand::rngs::StdRng;
pub use rand::Rng;
