//! Move generators (neighborhood operators) for the annealing engine.
//!
//! A move generator produces a neighbor of the current state. The engine
//! keeps a library of named generators and picks among them adaptively each
//! iteration, so generators declare their own applicability.

use crate::core::state::State;
use rand::rngs::StdRng;

/// Produces a neighboring state from the current state.
///
/// Generators are stateless across calls: everything they need must come
/// from the state, the temperature, and the random number generator. The
/// returned state must be independent of the input (cloning is the
/// generator's responsibility). A generator may return the state unchanged
/// when it finds no useful move; the engine treats that as a neutral
/// candidate rather than an error.
///
/// `applicable` is a cheap predicate consulted before selection. A
/// generator that is never applicable is simply never invoked; if *no*
/// generator is applicable the engine stops and returns its current best.
///
/// The temperature is passed to `generate` so operators can scale their
/// perturbations with the cooling schedule, but most operators ignore it.
pub trait MoveGenerator<S: State>: Send + Sync {
    /// Unique name of this operator, used in statistics and log records.
    fn name(&self) -> &str;

    /// Whether this operator can produce a move from the given state.
    fn applicable(&self, _state: &S) -> bool {
        true
    }

    /// Produces an independent neighbor of `state`.
    fn generate(&self, state: &S, temperature: f64, rng: &mut StdRng) -> S;
}
