//! Inter-route swap operator.
//!
//! # Algorithm
//!
//! For every pair of routes (i, j), i < j, tries exchanging each customer
//! of route i with each customer of route j. Given
//! R1 = [.., a, x, b, ..] and R2 = [.., c, y, d, ..], the exchange yields
//! R1' = [.., a, y, b, ..] and R2' = [.., c, x, d, ..] with delta
//!
//! ```text
//! d(a,y) + d(y,b) - d(a,x) - d(x,b) + d(c,x) + d(x,d) - d(c,y) - d(y,d)
//! ```
//!
//! The best capacity-feasible exchange of a pair is applied when it
//! strictly lowers the pair's cost. Pairs are visited in index order and
//! later pairs see the routes produced by earlier ones.
//!
//! # Complexity
//!
//! O(n²) per pass, where n = number of customers.

use std::sync::Arc;

use tracing::trace;

use crate::models::{Instance, Route, Solution};

use super::{pair_improves, IMPROVEMENT_EPSILON};

/// An exchange of the customers at node positions `pos_a` and `pos_b`.
#[derive(Debug, Clone, Copy)]
struct SwapMove {
    pos_a: usize,
    pos_b: usize,
    delta: f64,
}

/// Applies one pass of inter-route swap improvement.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use cvrp_heuristics::distance::DistanceMatrix;
/// use cvrp_heuristics::models::{Customer, Instance, Route, Solution};
/// use cvrp_heuristics::local_search::swap_improve;
///
/// // 1 is close to 2 and 3 is close to 4, but the routes pair them crosswise.
/// let mut dm = DistanceMatrix::new(5);
/// for id in 1..5 {
///     dm.set_symmetric(0, id, 5.0);
/// }
/// dm.set_symmetric(1, 2, 1.0);
/// dm.set_symmetric(3, 4, 1.0);
/// dm.set_symmetric(1, 3, 10.0);
/// dm.set_symmetric(2, 4, 10.0);
/// dm.set_symmetric(1, 4, 10.0);
/// dm.set_symmetric(2, 3, 10.0);
/// let customers = (1..5).map(|id| Customer::new(id, 1).unwrap()).collect();
/// let instance = Arc::new(Instance::new(customers, dm, 10, 0, 2).unwrap());
///
/// let crossed = Solution::with_routes(
///     Arc::clone(&instance),
///     vec![
///         Route::new(Arc::clone(&instance), &[1, 3]),
///         Route::new(Arc::clone(&instance), &[2, 4]),
///     ],
/// );
/// let improved = swap_improve(&crossed);
/// assert_eq!(crossed.total_cost(), 40.0);
/// assert_eq!(improved.total_cost(), 22.0);
/// ```
pub fn swap_improve(solution: &Solution) -> Solution {
    if solution.num_routes() < 2 {
        return solution.clone();
    }

    let instance = solution.instance();
    let mut routes: Vec<Route> = solution.routes().to_vec();
    let mut applied = 0;

    for a in 0..routes.len() {
        for b in (a + 1)..routes.len() {
            let Some(mv) = best_swap(&routes[a], &routes[b], instance) else {
                continue;
            };
            let (new_a, new_b) = apply_swap(&routes[a], &routes[b], mv, instance);
            if pair_improves((&routes[a], &routes[b]), (&new_a, &new_b)) {
                trace!(route_a = a, route_b = b, delta = mv.delta, "swap applied");
                routes[a] = new_a;
                routes[b] = new_b;
                applied += 1;
            }
        }
    }

    if applied == 0 {
        return solution.clone();
    }
    Solution::with_routes(Arc::clone(instance), routes)
}

/// Best improving, capacity-feasible exchange between two routes.
fn best_swap(route_a: &Route, route_b: &Route, instance: &Instance) -> Option<SwapMove> {
    let dm = instance.distances();
    let na = route_a.nodes();
    let nb = route_b.nodes();
    let mut best: Option<SwapMove> = None;

    for pos_a in 1..na.len() - 1 {
        let (pa, x, sa) = (na[pos_a - 1], na[pos_a], na[pos_a + 1]);
        let dx = i64::from(instance.demand(x).unwrap_or_default());

        for pos_b in 1..nb.len() - 1 {
            let (pb, y, sb) = (nb[pos_b - 1], nb[pos_b], nb[pos_b + 1]);
            let dy = i64::from(instance.demand(y).unwrap_or_default());

            if route_a.demand() - dx + dy > i64::from(route_a.capacity())
                || route_b.demand() - dy + dx > i64::from(route_b.capacity())
            {
                continue;
            }

            let delta = dm.get(pa, y) + dm.get(y, sa) - dm.get(pa, x) - dm.get(x, sa)
                + dm.get(pb, x)
                + dm.get(x, sb)
                - dm.get(pb, y)
                - dm.get(y, sb);

            if delta < -IMPROVEMENT_EPSILON && best.is_none_or(|b| delta < b.delta) {
                best = Some(SwapMove {
                    pos_a,
                    pos_b,
                    delta,
                });
            }
        }
    }

    best
}

fn apply_swap(
    route_a: &Route,
    route_b: &Route,
    mv: SwapMove,
    instance: &Arc<Instance>,
) -> (Route, Route) {
    let mut nodes_a = route_a.nodes().to_vec();
    let mut nodes_b = route_b.nodes().to_vec();
    std::mem::swap(&mut nodes_a[mv.pos_a], &mut nodes_b[mv.pos_b]);
    (
        Route::new(Arc::clone(instance), &nodes_a),
        Route::new(Arc::clone(instance), &nodes_b),
    )
}
