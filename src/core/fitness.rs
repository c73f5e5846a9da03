//! Fitness aggregation over constraint scores.
//!
//! The evaluator folds all constraint scores into one scalar cost to
//! minimize. Hard violations are counted and multiplied by a large caller
//! configured weight; soft constraints contribute their weighted degree of
//! dissatisfaction. The weight must be calibrated so that any feasible
//! state outranks any infeasible one.

use crate::core::constraint::{violation_count, Constraint, ConstraintKind};
use crate::core::state::State;

/// The result of evaluating a state: its scalar cost and how many hard
/// violations it carries. The hard count is kept separate because the
/// two-phase acceptance rules order states by it before looking at fitness.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluation {
    /// Scalar cost to minimize. Never NaN: degenerate constraint scores are
    /// mapped to `f64::INFINITY` so the candidate can never be accepted.
    pub fitness: f64,
    /// Total count of distinct hard-constraint violations.
    pub hard_violations: usize,
}

/// Aggregates constraint scores into a single cost.
///
/// The constraint set is partitioned once at construction into hard and
/// soft lists; evaluation walks hard constraints first, then soft. Order
/// within a partition carries no semantic weight.
///
/// The cost of a state is:
///
/// ```text
/// fitness(S) = hard_violations(S) * hard_weight
///            + sum over soft constraints of (1 - score(S)) * weight
/// ```
pub struct FitnessEvaluator<S: State> {
    hard: Vec<Box<dyn Constraint<S>>>,
    soft: Vec<Box<dyn Constraint<S>>>,
    hard_weight: f64,
}

impl<S: State> FitnessEvaluator<S> {
    /// Partitions `constraints` into hard and soft lists.
    ///
    /// `hard_weight` is the multiplier applied to the hard-violation count;
    /// callers pick it large enough (typically 10^4 to 10^5) that one hard
    /// violation outweighs every soft penalty combined.
    pub fn new(constraints: Vec<Box<dyn Constraint<S>>>, hard_weight: f64) -> Self {
        let (hard, soft) = constraints
            .into_iter()
            .partition::<Vec<_>, _>(|c| c.kind().is_hard());

        Self {
            hard,
            soft,
            hard_weight,
        }
    }

    /// Scores a state, returning its fitness and hard-violation count.
    pub fn evaluate(&self, state: &S) -> Evaluation {
        let hard_violations = self.hard_violations(state);
        let mut penalty = 0.0;

        for constraint in &self.soft {
            let score = constraint.evaluate(state);
            if score.is_nan() {
                log::warn!(
                    "constraint {:?} produced a NaN score; rejecting candidate",
                    constraint.name()
                );
                return Evaluation {
                    fitness: f64::INFINITY,
                    hard_violations,
                };
            }
            let weight = match constraint.kind() {
                ConstraintKind::Soft { weight } => weight,
                ConstraintKind::Hard => 0.0,
            };
            penalty += (1.0 - score) * weight;
        }

        let fitness = hard_violations as f64 * self.hard_weight + penalty;
        Evaluation {
            fitness: if fitness.is_nan() {
                f64::INFINITY
            } else {
                fitness
            },
            hard_violations,
        }
    }

    /// Counts distinct hard-constraint violations.
    pub fn hard_violations(&self, state: &S) -> usize {
        self.hard
            .iter()
            .map(|c| self.count_checked(c.as_ref(), state))
            .sum()
    }

    /// Counts distinct soft-constraint violations, using the same counting
    /// rule as the hard side.
    pub fn soft_violations(&self, state: &S) -> usize {
        self.soft
            .iter()
            .map(|c| violation_count(c.as_ref(), state))
            .sum()
    }

    /// Collects every violation description: hard constraints first, then
    /// soft. Deterministic for a given state — re-running it on the same
    /// state yields the same list.
    ///
    /// Constraints that do not enumerate violations contribute one generic
    /// entry per inferred violation so the report length matches the counts.
    pub fn violation_report(&self, state: &S) -> Vec<String> {
        let mut report = Vec::new();
        for constraint in self.hard.iter().chain(self.soft.iter()) {
            match constraint.violations(state) {
                Some(list) => report.extend(list),
                None => {
                    let count = violation_count(constraint.as_ref(), state);
                    report.extend(
                        (0..count).map(|_| format!("{} violated", constraint.name())),
                    );
                }
            }
        }
        report
    }

    /// The hard constraints, in partition order.
    pub fn hard_constraints(&self) -> &[Box<dyn Constraint<S>>] {
        &self.hard
    }

    /// The soft constraints, in partition order.
    pub fn soft_constraints(&self) -> &[Box<dyn Constraint<S>>] {
        &self.soft
    }

    fn count_checked(&self, constraint: &dyn Constraint<S>, state: &S) -> usize {
        let score = constraint.evaluate(state);
        if score.is_nan() {
            log::warn!(
                "hard constraint {:?} produced a NaN score; counting one violation",
                constraint.name()
            );
        }
        violation_count(constraint, state)
    }
}
