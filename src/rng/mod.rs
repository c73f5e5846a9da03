//! Random number generation utilities for the annealing engine.
//!
//! This module provides tools for creating deterministic random number
//! generators that ensure reproducibility of optimization runs.

pub mod seeded_rng;
