//! Nearest-insertion constructive heuristic.
//!
//! Builds routes greedily: starting from the depot, the next customer is
//! always the unvisited one nearest to the last customer placed. When that
//! customer does not fit, the route is closed and a new one opened. If a
//! freshly opened route cannot take its first candidate (a customer whose
//! demand exceeds the capacity), construction stops and the remaining
//! customers stay unvisited.
//!
//! The [`InsertionPolicy::CheapestPosition`] variant keeps the same
//! selection rule but places each customer at the interior position with
//! the smallest detour instead of appending it.
//!
//! # Complexity
//!
//! O(n²) for appending, O(n² · r) for cheapest position, where r is the
//! longest route.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{Instance, Route, Solution};

/// Where nearest insertion places the selected customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InsertionPolicy {
    /// Append right before the closing depot.
    #[default]
    AppendNearest,
    /// Insert at the position with minimum detour.
    CheapestPosition,
}

/// Constructs a solution using nearest insertion.
///
/// Fleet size does not limit the number of routes; check
/// [`Solution::is_feasible`] and [`Solution::visits_all`] on the result.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use cvrp_heuristics::distance::DistanceMatrix;
/// use cvrp_heuristics::models::{Customer, Instance};
/// use cvrp_heuristics::constructive::{nearest_insertion, InsertionPolicy};
///
/// let points: Vec<(usize, f64, f64)> = (0..4).map(|i| (i, i as f64, 0.0)).collect();
/// let dm = DistanceMatrix::from_coordinates(&points);
/// let customers = (1..4).map(|id| Customer::new(id, 10).unwrap()).collect();
/// let instance = Arc::new(Instance::new(customers, dm, 30, 0, 1).unwrap());
///
/// let solution = nearest_insertion(&instance, InsertionPolicy::AppendNearest);
/// assert_eq!(solution.routes()[0].customers(), &[1, 2, 3]);
/// assert!(solution.visits_all());
/// ```
pub fn nearest_insertion(instance: &Arc<Instance>, policy: InsertionPolicy) -> Solution {
    let n = instance.num_customers();
    let mut visited = vec![false; instance.distances().size()];
    let mut num_visited = 0;
    let mut routes = Vec::new();

    while num_visited < n {
        let mut route = Route::empty(Arc::clone(instance));
        let mut current = instance.depot();

        while let Some(next) = nearest_unvisited(instance, current, &visited) {
            let placed = match policy {
                InsertionPolicy::AppendNearest => route.push_customer(next),
                InsertionPolicy::CheapestPosition => {
                    let (position, _) = route.cheapest_insertion(next);
                    route.insert_customer(position, next)
                }
            };
            if placed.is_err() {
                break;
            }
            visited[next] = true;
            num_visited += 1;
            current = next;
        }

        if route.is_empty() {
            warn!(
                unvisited = n - num_visited,
                "nearest insertion stopped: no remaining customer fits an empty vehicle"
            );
            break;
        }
        routes.push(route);
    }

    let solution = Solution::with_routes(Arc::clone(instance), routes);
    debug!(
        ?policy,
        routes = solution.num_routes(),
        served = solution.num_served(),
        cost = solution.total_cost(),
        "nearest insertion finished"
    );
    solution
}

/// Unvisited customer nearest to `from`; ties go to roster order.
fn nearest_unvisited(instance: &Instance, from: usize, visited: &[bool]) -> Option<usize> {
    let candidates: Vec<usize> = instance.customer_ids().filter(|&id| !visited[id]).collect();
    instance.distances().nearest(from, &candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::Customer;

    fn line(demand: i32, capacity: i32) -> Arc<Instance> {
        let points: Vec<(usize, f64, f64)> = (0..4).map(|i| (i, i as f64, 0.0)).collect();
        let dm = DistanceMatrix::from_coordinates(&points);
        let customers = (1..4)
            .map(|id| Customer::new(id, demand).expect("valid"))
            .collect();
        Arc::new(Instance::new(customers, dm, capacity, 0, 3).expect("valid"))
    }

    #[test]
    fn test_ni_all_on_one_route() {
        let sol = nearest_insertion(&line(10, 100), InsertionPolicy::AppendNearest);
        assert_eq!(sol.num_routes(), 1);
        assert_eq!(sol.routes()[0].customers(), &[1, 2, 3]);
        // 0→1 + 1→2 + 2→3 + 3→0 = 1 + 1 + 1 + 3 = 6
        assert!((sol.total_cost() - 6.0).abs() < 1e-10);
        assert!(sol.is_valid_tour());
    }

    #[test]
    fn test_ni_split_routes() {
        // Capacity 20: first route takes 1, 2; second takes 3.
        let sol = nearest_insertion(&line(10, 20), InsertionPolicy::AppendNearest);
        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.routes()[0].customers(), &[1, 2]);
        assert_eq!(sol.routes()[1].customers(), &[3]);
        assert!(sol.visits_all());
    }

    #[test]
    fn test_ni_closes_route_on_nearest_that_does_not_fit() {
        // Customer 2 is nearest to 1 but too heavy; the route closes even
        // though customer 3 would still fit.
        let points: Vec<(usize, f64, f64)> = (0..4).map(|i| (i, i as f64, 0.0)).collect();
        let dm = DistanceMatrix::from_coordinates(&points);
        let customers = vec![
            Customer::new(1, 5).expect("valid"),
            Customer::new(2, 8).expect("valid"),
            Customer::new(3, 1).expect("valid"),
        ];
        let inst = Arc::new(Instance::new(customers, dm, 10, 0, 3).expect("valid"));
        let sol = nearest_insertion(&inst, InsertionPolicy::AppendNearest);
        assert_eq!(sol.routes()[0].customers(), &[1]);
        assert_eq!(sol.routes()[1].customers(), &[2, 3]);
    }

    #[test]
    fn test_ni_stops_on_oversized_customer() {
        let dm = DistanceMatrix::from_coordinates(&[(0, 0.0, 0.0), (1, 1.0, 0.0), (2, 5.0, 0.0)]);
        let customers = vec![
            Customer::new(1, 20).expect("valid"),
            Customer::new(2, 1).expect("valid"),
        ];
        let inst = Arc::new(Instance::new(customers, dm, 10, 0, 2).expect("valid"));
        let sol = nearest_insertion(&inst, InsertionPolicy::AppendNearest);
        assert_eq!(sol.num_routes(), 0);
        assert!(!sol.visits_all());
        assert_eq!(sol.unvisited(), vec![1, 2]);
    }

    #[test]
    fn test_ni_chooses_nearest() {
        let dm = DistanceMatrix::from_coordinates(&[
            (0, 0.0, 0.0),
            (1, 10.0, 0.0),
            (2, 1.0, 0.0),
        ]);
        let customers = vec![
            Customer::new(1, 5).expect("valid"),
            Customer::new(2, 5).expect("valid"),
        ];
        let inst = Arc::new(Instance::new(customers, dm, 100, 0, 1).expect("valid"));
        let sol = nearest_insertion(&inst, InsertionPolicy::AppendNearest);
        assert_eq!(sol.routes()[0].customers(), &[2, 1]);
    }

    #[test]
    fn test_ni_ties_follow_roster_order() {
        let dm = DistanceMatrix::from_coordinates(&[
            (0, 0.0, 0.0),
            (1, 1.0, 0.0),
            (2, -1.0, 0.0),
        ]);
        let roster = |ids: [usize; 2]| {
            let customers = ids
                .iter()
                .map(|&id| Customer::new(id, 1).expect("valid"))
                .collect();
            Arc::new(Instance::new(customers, dm.clone(), 10, 0, 1).expect("valid"))
        };

        let sol = nearest_insertion(&roster([2, 1]), InsertionPolicy::AppendNearest);
        assert_eq!(sol.routes()[0].customers(), &[2, 1]);
        let sol = nearest_insertion(&roster([1, 2]), InsertionPolicy::AppendNearest);
        assert_eq!(sol.routes()[0].customers(), &[1, 2]);
    }

    #[test]
    fn test_ni_empty() {
        let inst = Arc::new(
            Instance::new(vec![], DistanceMatrix::new(1), 10, 0, 1).expect("valid"),
        );
        let sol = nearest_insertion(&inst, InsertionPolicy::CheapestPosition);
        assert_eq!(sol.num_routes(), 0);
        assert!(sol.visits_all());
    }

    #[test]
    fn test_cheapest_position_places_by_detour() {
        let mut dm = DistanceMatrix::new(4);
        dm.set_symmetric(0, 1, 1.0);
        dm.set_symmetric(0, 2, 4.0);
        dm.set_symmetric(0, 3, 2.0);
        dm.set_symmetric(1, 2, 2.0);
        dm.set_symmetric(1, 3, 3.0);
        dm.set_symmetric(2, 3, 5.0);
        let customers = (1..4)
            .map(|id| Customer::new(id, 1).expect("valid"))
            .collect();
        let inst = Arc::new(Instance::new(customers, dm, 10, 0, 1).expect("valid"));

        let append = nearest_insertion(&inst, InsertionPolicy::AppendNearest);
        assert_eq!(append.routes()[0].customers(), &[1, 2, 3]);

        // Selection order is still 1, 2, 3. Customer 2 ties on both sides of 1
        // and takes the earliest slot; customer 3 is cheapest at the front.
        let cheapest = nearest_insertion(&inst, InsertionPolicy::CheapestPosition);
        assert_eq!(cheapest.routes()[0].customers(), &[3, 2, 1]);
        assert!((cheapest.total_cost() - 10.0).abs() < 1e-10);
        assert!(cheapest.is_valid_tour());
    }
}
