//! Constraint scoring for the annealing engine.
//!
//! A constraint is a pure, side-effect-free scoring function over a state.
//! Hard constraints decide feasibility; soft constraints express weighted
//! preferences. Both report a score in `[0, 1]` where `1.0` means fully
//! satisfied and `0.0` means completely violated.

use crate::core::state::State;

/// Whether a constraint decides feasibility or expresses a preference.
///
/// Hard constraints are counted, not weighted: each distinct violation of a
/// hard constraint contributes the configured hard weight to the fitness.
/// Soft constraints carry their own non-negative weight and contribute
/// `(1 - score) * weight`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConstraintKind {
    /// A requirement whose violation renders the state infeasible.
    Hard,
    /// A preference whose violation degrades but does not invalidate the state.
    Soft {
        /// Penalty multiplier applied to `(1 - score)`. Must be non-negative.
        weight: f64,
    },
}

impl ConstraintKind {
    /// Returns `true` for [`ConstraintKind::Hard`].
    pub fn is_hard(&self) -> bool {
        matches!(self, ConstraintKind::Hard)
    }
}

/// A pure scoring function over a state, tagged hard or soft.
///
/// Implementations must be side-effect free: `evaluate` may not mutate any
/// externally visible data, and calling it twice on the same state must
/// yield the same score. The engine evaluates constraints on every candidate,
/// so `evaluate` sits on the hot path.
///
/// `violations` is optional but strongly preferred for hard constraints:
/// when present it is the authoritative violation count and feeds the final
/// report verbatim. It must return an empty list exactly when
/// `evaluate` returns `1.0`, and one entry per *distinct* violation
/// otherwise.
///
/// # Examples
///
/// ```
/// use emberweave::prelude::*;
///
/// #[derive(Clone)]
/// struct Tokens(Vec<u32>);
///
/// impl State for Tokens {}
///
/// /// All tokens must be distinct.
/// struct Distinct;
///
/// impl Constraint<Tokens> for Distinct {
///     fn name(&self) -> &str {
///         "distinct-tokens"
///     }
///
///     fn kind(&self) -> ConstraintKind {
///         ConstraintKind::Hard
///     }
///
///     fn evaluate(&self, state: &Tokens) -> f64 {
///         let duplicates = state.0.len() - {
///             let mut seen = state.0.clone();
///             seen.sort_unstable();
///             seen.dedup();
///             seen.len()
///         };
///         1.0 / (1.0 + duplicates as f64)
///     }
/// }
///
/// let ok = Tokens(vec![1, 2, 3]);
/// assert_eq!(Distinct.evaluate(&ok), 1.0);
///
/// let bad = Tokens(vec![1, 1, 2]);
/// assert!(Distinct.evaluate(&bad) < 1.0);
/// ```
pub trait Constraint<S: State>: Send + Sync {
    /// Unique name of this constraint, used in reports and log records.
    fn name(&self) -> &str;

    /// Whether this constraint is hard or soft (and, if soft, its weight).
    fn kind(&self) -> ConstraintKind;

    /// Scores the state in `[0, 1]`; `1.0` iff the constraint is satisfied.
    ///
    /// Returning a value outside `[0, 1]` is a programming error in the
    /// implementation, not a runtime condition the engine recovers from.
    fn evaluate(&self, state: &S) -> f64;

    /// Enumerates distinct violations as human-readable descriptions.
    ///
    /// Returns `None` when the implementation does not enumerate violations;
    /// the engine then falls back to inferring a count from the score (see
    /// [`violation_count`]).
    fn violations(&self, _state: &S) -> Option<Vec<String>> {
        None
    }
}

/// Counts the distinct violations of a single constraint against a state.
///
/// Priority order:
///
/// 1. If the constraint enumerates [`Constraint::violations`], the count is
///    the length of that list.
/// 2. Otherwise the count is inferred from the common `score = 1 / (1 + k)`
///    convention: `k = round(1/score - 1)`, clamped to at least 1 whenever
///    the score is below 1. Scores whose inversion is not finite (zero or
///    NaN scores) collapse to a count of 1, since no multiplicity can be
///    recovered from them.
///
/// The inference path is a compatibility shim for constraints that score in
/// other shapes; implementations should prefer the explicit path.
pub fn violation_count<S: State>(constraint: &dyn Constraint<S>, state: &S) -> usize {
    if let Some(list) = constraint.violations(state) {
        return list.len();
    }

    let score = constraint.evaluate(state);
    if score >= 1.0 {
        return 0;
    }

    let inferred = (1.0 / score - 1.0).round();
    if inferred.is_finite() {
        inferred.max(1.0) as usize
    } else {
        1
    }
}
