//! Acceptance rules for the two annealing phases.
//!
//! The engine runs two regimes with different acceptance logic. The first
//! phase drives the hard-violation count down and may wander on fitness
//! via the Metropolis criterion; the second phase optimizes soft penalties
//! and must never regress past the best hard-violation count reached.

use crate::core::fitness::Evaluation;
use crate::utils::boltzmann_probability;
use rand::Rng;

/// The two regimes of the annealing run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Eliminate hard-constraint violations.
    HardElimination,
    /// Optimize soft constraints while preserving the hard-violation count.
    SoftOptimization,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::HardElimination => write!(f, "hard elimination"),
            Phase::SoftOptimization => write!(f, "soft optimization"),
        }
    }
}

/// The classic Metropolis criterion on a fitness delta.
///
/// Improvements (`candidate < current`) are always accepted; a worsening of
/// `delta` is accepted with probability `exp(-delta / temperature)`. A NaN
/// delta is never accepted.
///
/// # Examples
///
/// ```
/// use emberweave::core::acceptance::metropolis;
/// use emberweave::rng::seeded_rng::seeded_rng;
///
/// let mut rng = seeded_rng(42);
///
/// // Improvements are always accepted.
/// assert!(metropolis(10.0, 4.0, 1.0, &mut rng));
///
/// // At high temperature roughly 60% of a +5 worsening survives T = 10.
/// let accepted = (0..1000)
///     .filter(|_| metropolis(0.0, 5.0, 10.0, &mut rng))
///     .count();
/// assert!(accepted > 500 && accepted < 700);
/// ```
pub fn metropolis(current: f64, candidate: f64, temperature: f64, rng: &mut impl Rng) -> bool {
    let delta = candidate - current;
    if delta.is_nan() {
        return false;
    }
    if delta < 0.0 {
        true
    } else {
        rng.gen::<f64>() < boltzmann_probability(delta, temperature)
    }
}

/// Phase 1 acceptance: hard-constraint elimination.
///
/// - Fewer hard violations than the current state: accept.
/// - Equal hard violations: Metropolis on fitness.
/// - More hard violations: reject.
///
/// A candidate with non-finite fitness is rejected outright, even when its
/// hard count improved, so degenerate constraint scores can never enter the
/// current state.
pub fn hard_phase_accepts(
    current_hard: usize,
    candidate_hard: usize,
    current_fitness: f64,
    candidate_fitness: f64,
    temperature: f64,
    rng: &mut impl Rng,
) -> bool {
    if !candidate_fitness.is_finite() {
        return false;
    }

    if candidate_hard < current_hard {
        true
    } else if candidate_hard == current_hard {
        metropolis(current_fitness, candidate_fitness, temperature, rng)
    } else {
        false
    }
}

/// Phase 2 acceptance: soft optimization with strict hard preservation.
///
/// The comparison baseline for the hard count is the *best-so-far* state,
/// not the current one:
///
/// - More hard violations than the best: reject unconditionally. Once the
///   search has removed hard violations it must never regress, no matter
///   how hot the schedule currently runs.
/// - Fewer hard violations than the best: accept.
/// - Equal: Metropolis on fitness.
pub fn soft_phase_accepts(
    best_hard: usize,
    candidate_hard: usize,
    current_fitness: f64,
    candidate_fitness: f64,
    temperature: f64,
    rng: &mut impl Rng,
) -> bool {
    if !candidate_fitness.is_finite() {
        return false;
    }

    if candidate_hard > best_hard {
        false
    } else if candidate_hard < best_hard {
        true
    } else {
        metropolis(current_fitness, candidate_fitness, temperature, rng)
    }
}

/// Dispatches to the acceptance rule of the given phase.
pub fn accepts(
    phase: Phase,
    current: &Evaluation,
    candidate: &Evaluation,
    best_hard: usize,
    temperature: f64,
    rng: &mut impl Rng,
) -> bool {
    match phase {
        Phase::HardElimination => hard_phase_accepts(
            current.hard_violations,
            candidate.hard_violations,
            current.fitness,
            candidate.fitness,
            temperature,
            rng,
        ),
        Phase::SoftOptimization => soft_phase_accepts(
            best_hard,
            candidate.hard_violations,
            current.fitness,
            candidate.fitness,
            temperature,
            rng,
        ),
    }
}
