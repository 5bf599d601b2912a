//! Clarke-Wright savings algorithm.
//!
//! # Algorithm
//!
//! The savings algorithm (Clarke & Wright, 1964) starts with each customer
//! on its own route (depot → customer → depot). It then merges routes by
//! computing the "savings" of serving two customers on one trip:
//!
//! ```text
//! s(i, j) = d(0, i) + d(j, 0) - d(i, j)
//! ```
//!
//! Pairs are processed once, in decreasing order of savings (stable, so
//! ties keep roster order). A pair merges its two routes when both
//! customers sit at an end of different routes and the combined demand
//! fits. Merges are not limited by the fleet size; an oversized result is
//! reported by [`Solution::is_feasible`].
//!
//! # Complexity
//!
//! O(n² log n) where n = number of customers (dominated by sorting savings).
//!
//! # Reference
//!
//! Clarke, G. & Wright, J.W. (1964). "Scheduling of Vehicles from a Central
//! Depot to a Number of Delivery Points", *Operations Research* 12(4), 568-581.

use std::sync::Arc;

use tracing::debug;

use crate::models::{Instance, Route, Solution};

/// A savings value for merging two customers' routes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Saving {
    pub(crate) i: usize,
    pub(crate) j: usize,
    pub(crate) value: f64,
}

/// Where a merge attaches the two routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Junction {
    /// `i` ends its route, `j` starts its route: `ri + rj`.
    EndStart,
    /// `i` starts its route, `j` ends its route: `rj + ri`.
    StartEnd,
    /// Both end their routes: `ri + reverse(rj)`.
    EndEnd,
    /// Both start their routes: `reverse(ri) + rj`.
    StartStart,
}

/// Constructs a solution using the Clarke-Wright savings algorithm.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use cvrp_heuristics::distance::DistanceMatrix;
/// use cvrp_heuristics::models::{Customer, Instance};
/// use cvrp_heuristics::constructive::clarke_wright_savings;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 10.0, 20.0],
///     vec![10.0, 0.0, 15.0],
///     vec![20.0, 15.0, 0.0],
/// ])
/// .unwrap();
/// let customers = vec![Customer::new(1, 5).unwrap(), Customer::new(2, 3).unwrap()];
/// let instance = Arc::new(Instance::new(customers, dm, 10, 0, 2).unwrap());
///
/// let solution = clarke_wright_savings(&instance);
/// assert_eq!(solution.num_routes(), 1);
/// assert_eq!(solution.total_cost(), 45.0);
/// ```
pub fn clarke_wright_savings(instance: &Arc<Instance>) -> Solution {
    if instance.num_customers() == 0 {
        return Solution::new(Arc::clone(instance));
    }

    let savings = compute_savings(instance);

    // Each customer starts in its own slot; slot_of[id] tracks where it lives.
    let mut slots: Vec<Vec<usize>> = instance.customer_ids().map(|id| vec![id]).collect();
    let mut slot_load: Vec<i64> = instance
        .customers()
        .iter()
        .map(|c| i64::from(c.demand()))
        .collect();
    let mut slot_of: Vec<usize> = vec![usize::MAX; instance.distances().size()];
    for (slot, id) in instance.customer_ids().enumerate() {
        slot_of[id] = slot;
    }

    let mut merges = 0;
    for saving in &savings {
        let si = slot_of[saving.i];
        let sj = slot_of[saving.j];
        if si == sj {
            continue;
        }

        let combined_load = slot_load[si] + slot_load[sj];
        if combined_load > i64::from(instance.capacity()) {
            continue;
        }

        let Some(junction) = junction(&slots[si], &slots[sj], saving.i, saving.j) else {
            continue;
        };

        let mut first = std::mem::take(&mut slots[si]);
        let mut second = std::mem::take(&mut slots[sj]);
        match junction {
            Junction::EndStart => {}
            Junction::StartEnd => std::mem::swap(&mut first, &mut second),
            Junction::EndEnd => second.reverse(),
            Junction::StartStart => first.reverse(),
        }
        first.append(&mut second);

        for &cid in &first {
            slot_of[cid] = si;
        }
        slots[si] = first;
        slot_load[si] = combined_load;
        slot_load[sj] = 0;
        merges += 1;
    }

    let routes: Vec<Route> = slots
        .iter()
        .filter(|members| !members.is_empty())
        .map(|members| Route::new(Arc::clone(instance), members))
        .collect();

    let solution = Solution::with_routes(Arc::clone(instance), routes);
    debug!(
        customers = instance.num_customers(),
        merges,
        routes = solution.num_routes(),
        cost = solution.total_cost(),
        "clarke-wright construction finished"
    );
    solution
}

/// Savings of every unordered customer pair, sorted by decreasing value.
///
/// Pairs follow roster order (`i` before `j`) and the sort is stable.
pub(crate) fn compute_savings(instance: &Instance) -> Vec<Saving> {
    let depot = instance.depot();
    let dm = instance.distances();
    let ids: Vec<usize> = instance.customer_ids().collect();
    let n = ids.len();

    let mut savings = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for (a, &i) in ids.iter().enumerate() {
        for &j in &ids[a + 1..] {
            let value = dm.get(depot, i) + dm.get(j, depot) - dm.get(i, j);
            savings.push(Saving { i, j, value });
        }
    }

    savings.sort_by(|a, b| b.value.total_cmp(&a.value));
    savings
}

fn junction(route_i: &[usize], route_j: &[usize], i: usize, j: usize) -> Option<Junction> {
    let i_at_start = route_i.first() == Some(&i);
    let i_at_end = route_i.last() == Some(&i);
    let j_at_start = route_j.first() == Some(&j);
    let j_at_end = route_j.last() == Some(&j);

    if i_at_end && j_at_start {
        Some(Junction::EndStart)
    } else if i_at_start && j_at_end {
        Some(Junction::StartEnd)
    } else if i_at_end && j_at_end {
        Some(Junction::EndEnd)
    } else if i_at_start && j_at_start {
        Some(Junction::StartStart)
    } else {
        None
    }
}
