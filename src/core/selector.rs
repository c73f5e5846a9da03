//! Adaptive operator selection.
//!
//! The selector keeps per-operator credit statistics and uses them to bias
//! the choice of the next move generator toward operators that have been
//! producing accepted improvements, while an exploration floor keeps every
//! applicable operator in play.

use rand::Rng;

/// Credit counters for a single move generator.
///
/// `attempts` counts every invocation, `accepted` the candidates the
/// acceptance rule let through, and `improvements` the accepted candidates
/// whose fitness was strictly below the pre-move fitness. The invariant
/// `improvements <= accepted <= attempts` holds at all times.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OperatorStats {
    /// Number of times the operator was invoked.
    pub attempts: u64,
    /// Number of candidates the acceptance rule accepted.
    pub accepted: u64,
    /// Number of accepted candidates that strictly improved fitness.
    pub improvements: u64,
}

impl OperatorStats {
    /// Fraction of attempts that yielded strictly improving accepted
    /// candidates; defined as 0 when there are no attempts yet.
    pub fn success_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.improvements as f64 / self.attempts as f64
        }
    }
}

/// Picks the next move generator using a two-tier policy.
///
/// With probability `exploration_rate` the selector picks uniformly at
/// random from the applicable operators; otherwise it picks with
/// probability proportional to each applicable operator's success rate,
/// falling back to a uniform pick while every rate is still zero (cold
/// start). Non-applicable operators are never considered.
///
/// The exploration floor is load-bearing: without it an operator that
/// produces one lucky early improvement starves the rest of the library
/// and the search collapses into a single neighborhood.
pub struct OperatorSelector {
    stats: Vec<OperatorStats>,
    exploration_rate: f64,
}

impl OperatorSelector {
    /// Creates a selector for `operator_count` operators with the given
    /// exploration floor. The floor is validated upstream by the annealer
    /// configuration; 0.30 is the tested default.
    pub fn new(operator_count: usize, exploration_rate: f64) -> Self {
        Self {
            stats: vec![OperatorStats::default(); operator_count],
            exploration_rate,
        }
    }

    /// Selects one operator index out of `applicable`.
    ///
    /// `applicable` holds indices into the operator library and must be
    /// non-empty; the annealer terminates before calling this when no
    /// operator applies.
    pub fn select(&self, applicable: &[usize], rng: &mut impl Rng) -> usize {
        debug_assert!(!applicable.is_empty());

        if applicable.len() == 1 || rng.gen::<f64>() < self.exploration_rate {
            return applicable[rng.gen_range(0..applicable.len())];
        }

        let total: f64 = applicable
            .iter()
            .map(|&idx| self.stats[idx].success_rate())
            .sum();

        if total <= 0.0 {
            return applicable[rng.gen_range(0..applicable.len())];
        }

        let mut remaining = rng.gen::<f64>() * total;
        for &idx in applicable {
            remaining -= self.stats[idx].success_rate();
            if remaining <= 0.0 {
                return idx;
            }
        }

        // Floating-point accumulation underflow: fall back to the last
        // applicable operator.
        *applicable.last().unwrap()
    }

    /// Records an invocation of the operator at `index`.
    pub fn record_attempt(&mut self, index: usize) {
        self.stats[index].attempts += 1;
    }

    /// Records the acceptance decision for the operator at `index`.
    ///
    /// `improved` may only be true for accepted candidates whose fitness
    /// fell strictly below the pre-move fitness.
    pub fn record_outcome(&mut self, index: usize, accepted: bool, improved: bool) {
        if accepted {
            self.stats[index].accepted += 1;
            if improved {
                self.stats[index].improvements += 1;
            }
        }
    }

    /// The per-operator statistics, indexed like the operator library.
    pub fn stats(&self) -> &[OperatorStats] {
        &self.stats
    }

    /// Zeroes every counter; called at the start of each run.
    pub fn reset(&mut self) {
        for stats in &mut self.stats {
            *stats = OperatorStats::default();
        }
    }
}
