//! Local search operators for improving CVRP solutions.
//!
//! - [`swap_improve`] - Inter-route exchange of two customers
//! - [`relocate_improve`] - Inter-route move of one customer
//! - [`iterated_local_search`] - Swap then relocate, repeated to a local optimum
//!
//! Operators evaluate moves with incremental edge deltas, then rebuild the
//! affected routes from scratch and re-check the gain before accepting.
//! They never mutate their input and return the input unchanged (a clone)
//! when nothing improves.

use crate::models::Route;

mod iterated;
mod relocate;
mod swap;

pub use iterated::{clarke_wright_with_local_search, iterated_local_search, LocalSearchOutcome};
pub use relocate::relocate_improve;
pub use swap::swap_improve;

/// Minimum cost decrease for a move to count as an improvement.
pub const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// Returns `true` if the rebuilt pair is within capacity and strictly
/// cheaper than the pair it replaces.
fn pair_improves(old: (&Route, &Route), new: (&Route, &Route)) -> bool {
    new.0.is_feasible()
        && new.1.is_feasible()
        && new.0.cost() + new.1.cost() < old.0.cost() + old.1.cost() - IMPROVEMENT_EPSILON
}
