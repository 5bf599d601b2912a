//! Inter-route customer relocation operator.
//!
//! # Algorithm
//!
//! For every pair of routes (i, j), i < j, tries moving each customer of
//! one route to every insertion position of the other, in both directions.
//! The best capacity-feasible move of a pair is applied when it strictly
//! lowers the pair's cost. A route left without customers is dropped.
//!
//! # Complexity
//!
//! O(n²) per pass, where n = number of customers.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use std::sync::Arc;

use tracing::trace;

use crate::models::{Instance, Route, Solution};

use super::{pair_improves, IMPROVEMENT_EPSILON};

/// Move the customer at node position `from_pos` of the source route to
/// interior position `to_pos` of the target route.
#[derive(Debug, Clone, Copy)]
struct RelocateMove {
    from_pos: usize,
    to_pos: usize,
    delta: f64,
}

/// Applies one pass of inter-route relocate improvement.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use cvrp_heuristics::distance::DistanceMatrix;
/// use cvrp_heuristics::models::{Customer, Instance, Route, Solution};
/// use cvrp_heuristics::local_search::relocate_improve;
///
/// let dm = DistanceMatrix::from_coordinates(&[
///     (0, 0.0, 0.0),
///     (1, 10.0, 0.0),
///     (2, 10.0, 1.0),
/// ]);
/// let customers = (1..3).map(|id| Customer::new(id, 1).unwrap()).collect();
/// let instance = Arc::new(Instance::new(customers, dm, 10, 0, 2).unwrap());
///
/// let split = Solution::with_routes(
///     Arc::clone(&instance),
///     vec![
///         Route::new(Arc::clone(&instance), &[1]),
///         Route::new(Arc::clone(&instance), &[2]),
///     ],
/// );
/// let improved = relocate_improve(&split);
/// assert_eq!(improved.num_routes(), 1);
/// assert!(improved.total_cost() < split.total_cost());
/// ```
pub fn relocate_improve(solution: &Solution) -> Solution {
    if solution.num_routes() < 2 {
        return solution.clone();
    }

    let instance = solution.instance();
    let mut routes: Vec<Route> = solution.routes().to_vec();
    let mut applied = 0;

    for a in 0..routes.len() {
        for b in (a + 1)..routes.len() {
            let forward = best_relocate(&routes[a], &routes[b], instance);
            let backward = best_relocate(&routes[b], &routes[a], instance);

            let (new_a, new_b, delta) = match (forward, backward) {
                (Some(f), Some(r)) if r.delta < f.delta => {
                    let (new_b, new_a) = apply_relocate(&routes[b], &routes[a], r, instance);
                    (new_a, new_b, r.delta)
                }
                (Some(f), _) => {
                    let (new_a, new_b) = apply_relocate(&routes[a], &routes[b], f, instance);
                    (new_a, new_b, f.delta)
                }
                (None, Some(r)) => {
                    let (new_b, new_a) = apply_relocate(&routes[b], &routes[a], r, instance);
                    (new_a, new_b, r.delta)
                }
                (None, None) => continue,
            };

            if pair_improves((&routes[a], &routes[b]), (&new_a, &new_b)) {
                trace!(route_a = a, route_b = b, delta, "relocate applied");
                routes[a] = new_a;
                routes[b] = new_b;
                applied += 1;
            }
        }
    }

    if applied == 0 {
        return solution.clone();
    }
    routes.retain(|r| !r.is_empty());
    Solution::with_routes(Arc::clone(instance), routes)
}

/// Best improving, capacity-feasible move from `from` into `to`.
fn best_relocate(from: &Route, to: &Route, instance: &Instance) -> Option<RelocateMove> {
    let dm = instance.distances();
    let nodes = from.nodes();
    let mut best: Option<RelocateMove> = None;

    for from_pos in 1..nodes.len() - 1 {
        let (prev, x, next) = (nodes[from_pos - 1], nodes[from_pos], nodes[from_pos + 1]);
        let dx = i64::from(instance.demand(x).unwrap_or_default());
        if to.demand() + dx > i64::from(to.capacity()) {
            continue;
        }

        let removal = dm.get(prev, next) - dm.get(prev, x) - dm.get(x, next);

        for to_pos in 0..=to.len() {
            let delta = removal + to.insertion_delta(to_pos, x);
            if delta < -IMPROVEMENT_EPSILON && best.is_none_or(|b| delta < b.delta) {
                best = Some(RelocateMove {
                    from_pos,
                    to_pos,
                    delta,
                });
            }
        }
    }

    best
}

/// Returns the rebuilt `(from, to)` pair.
fn apply_relocate(
    from: &Route,
    to: &Route,
    mv: RelocateMove,
    instance: &Arc<Instance>,
) -> (Route, Route) {
    let mut from_ids = from.customers().to_vec();
    let customer = from_ids.remove(mv.from_pos - 1);
    let mut to_ids = to.customers().to_vec();
    to_ids.insert(mv.to_pos, customer);
    (
        Route::new(Arc::clone(instance), &from_ids),
        Route::new(Arc::clone(instance), &to_ids),
    )
}
