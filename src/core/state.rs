//! State representation for the annealing engine.
//!
//! The `State` trait marks a candidate solution in the search space.
//! The engine treats states as opaque: the only operation it requires
//! is producing an independent deep copy.

/// The `State` trait defines the representation of a candidate solution.
///
/// The engine never mutates a caller-supplied state in place. Instead it
/// works exclusively on copies obtained through [`State::deep_clone`], so
/// mutating a clone must never be observable through the original. For
/// plain owned data the derived `Clone` already satisfies this, which is
/// why `deep_clone` defaults to `Clone::clone`; implementors backed by
/// shared structures can override it with a copy-on-write variant as long
/// as the independence guarantee holds.
///
/// # Examples
///
/// ```
/// use emberweave::prelude::*;
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Tokens(Vec<u32>);
///
/// impl State for Tokens {}
///
/// let original = Tokens(vec![1, 2, 3]);
/// let mut copy = original.deep_clone();
/// copy.0.push(4);
/// assert_eq!(original, Tokens(vec![1, 2, 3]));
/// ```
pub trait State: Clone + Send + Sync {
    /// Produces an independent copy of this state.
    ///
    /// The returned value must not share mutable structure with `self`:
    /// modifying the copy must leave the original untouched.
    fn deep_clone(&self) -> Self {
        self.clone()
    }
}
