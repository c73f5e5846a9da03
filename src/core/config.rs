//! Caller-facing configuration for the annealing engine.
//!
//! Every knob the engine exposes lives here. Configuration mistakes are
//! caller programming errors and are surfaced as [`ConfigError`] values at
//! construction time; nothing is silently clamped or repaired.

use crate::core::progress::LogOptions;
use thiserror::Error;

/// Fatal configuration errors detected at construction.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A temperature bound was zero or negative.
    #[error("temperature must be positive, got {0}")]
    NonPositiveTemperature(f64),

    /// The initial temperature did not exceed the termination temperature.
    #[error("initial temperature {initial} must exceed minimum temperature {min}")]
    TemperatureOrder {
        /// Configured initial temperature.
        initial: f64,
        /// Configured termination temperature.
        min: f64,
    },

    /// The geometric cooling factor was outside the open interval (0, 1).
    #[error("cooling rate must be in (0, 1), got {0}")]
    CoolingRateOutOfRange(f64),

    /// The hard-violation weight was zero or negative.
    #[error("hard-constraint weight must be positive, got {0}")]
    NonPositiveHardWeight(f64),

    /// The reheat multiplier would not raise the temperature.
    #[error("reheat factor must be greater than 1, got {0}")]
    ReheatFactorTooSmall(f64),

    /// The exploration floor left the tested range.
    #[error("exploration rate must be in [0.2, 1.0], got {0}")]
    ExplorationRateOutOfRange(f64),

    /// A soft constraint carried a negative weight.
    #[error("soft constraint {name:?} has negative weight {weight}")]
    NegativeConstraintWeight {
        /// Name of the offending constraint.
        name: String,
        /// The negative weight it carried.
        weight: f64,
    },
}

/// Complete configuration of an annealing run.
///
/// # Examples
///
/// ```
/// use emberweave::prelude::*;
///
/// let config = AnnealerConfig {
///     initial_temperature: 500.0,
///     max_iterations: 20_000,
///     ..AnnealerConfig::default()
/// };
/// assert!(config.validate().is_ok());
///
/// let broken = AnnealerConfig {
///     cooling_rate: 1.5,
///     ..AnnealerConfig::default()
/// };
/// assert!(broken.validate().is_err());
/// ```
#[derive(Clone, Debug)]
pub struct AnnealerConfig {
    /// Initial temperature; must exceed `min_temperature`.
    pub initial_temperature: f64,
    /// Termination temperature for the soft-optimization phase.
    pub min_temperature: f64,
    /// Geometric cooling factor, in (0, 1).
    pub cooling_rate: f64,
    /// Hard iteration cap across both phases.
    pub max_iterations: u64,
    /// Multiplier applied to the hard-violation count in fitness. Pick it
    /// large enough that any feasible state outranks any infeasible one.
    pub hard_weight: f64,
    /// Stagnation count at which the run becomes eligible for reheating.
    pub reheat_threshold: u64,
    /// Multiplier applied to the temperature on reheat; must exceed 1.
    pub reheat_factor: f64,
    /// Upper bound on reheats over the whole run.
    pub max_reheats: u32,
    /// Probability of picking an operator uniformly instead of by credit.
    /// 0.30 is the tested default; values below 0.20 are rejected because
    /// they let a lucky early operator starve the rest of the library.
    pub exploration_rate: f64,
    /// Progress reporting options.
    pub logging: LogOptions,
}

impl Default for AnnealerConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1_000.0,
            min_temperature: 0.01,
            cooling_rate: 0.995,
            max_iterations: 100_000,
            hard_weight: 10_000.0,
            reheat_threshold: 500,
            reheat_factor: 10.0,
            max_reheats: 5,
            exploration_rate: 0.30,
            logging: LogOptions::default(),
        }
    }
}

impl AnnealerConfig {
    /// Checks every field against its documented range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_temperature <= 0.0 {
            return Err(ConfigError::NonPositiveTemperature(self.initial_temperature));
        }
        if self.min_temperature <= 0.0 {
            return Err(ConfigError::NonPositiveTemperature(self.min_temperature));
        }
        if self.initial_temperature <= self.min_temperature {
            return Err(ConfigError::TemperatureOrder {
                initial: self.initial_temperature,
                min: self.min_temperature,
            });
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(ConfigError::CoolingRateOutOfRange(self.cooling_rate));
        }
        if self.hard_weight <= 0.0 {
            return Err(ConfigError::NonPositiveHardWeight(self.hard_weight));
        }
        if self.reheat_factor <= 1.0 {
            return Err(ConfigError::ReheatFactorTooSmall(self.reheat_factor));
        }
        if !(0.2..=1.0).contains(&self.exploration_rate) {
            return Err(ConfigError::ExplorationRateOutOfRange(self.exploration_rate));
        }
        Ok(())
    }
}
