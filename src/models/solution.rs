//! Solution type.

use std::fmt;
use std::sync::Arc;

use crate::distance::DistanceMatrix;
use crate::error::SolutionError;

use super::{Customer, Instance, Route};

/// A set of routes over one instance.
///
/// Operators never mutate a solution they received; they build and return
/// a new one. Cloning copies the route list, not the instance.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use cvrp_heuristics::distance::DistanceMatrix;
/// use cvrp_heuristics::models::{Customer, Instance, Route, Solution};
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 10.0, 20.0],
///     vec![10.0, 0.0, 15.0],
///     vec![20.0, 15.0, 0.0],
/// ])
/// .unwrap();
/// let customers = vec![Customer::new(1, 5).unwrap(), Customer::new(2, 3).unwrap()];
/// let instance = Arc::new(Instance::new(customers, dm, 10, 0, 1).unwrap());
///
/// let mut sol = Solution::new(Arc::clone(&instance));
/// sol.add_route(Route::new(Arc::clone(&instance), &[1, 2])).unwrap();
/// assert_eq!(sol.total_cost(), 45.0);
/// assert!(sol.is_feasible());
/// assert!(sol.visits_all());
///
/// // The fleet has a single vehicle.
/// assert!(sol.add_route(Route::empty(instance)).is_err());
/// ```
#[derive(Clone)]
pub struct Solution {
    routes: Vec<Route>,
    instance: Arc<Instance>,
    total_cost: f64,
}

impl Solution {
    /// Creates a solution with no routes.
    pub fn new(instance: Arc<Instance>) -> Self {
        Self {
            routes: Vec::new(),
            instance,
            total_cost: 0.0,
        }
    }

    /// Creates a solution seeded with `routes`.
    ///
    /// The fleet size is not enforced here; an oversized route list is
    /// reported by [`is_feasible`](Self::is_feasible).
    pub fn with_routes(instance: Arc<Instance>, routes: Vec<Route>) -> Self {
        let total_cost = routes.iter().map(Route::cost).sum();
        Self {
            routes,
            instance,
            total_cost,
        }
    }

    /// Appends a route if a vehicle is still free.
    pub fn add_route(&mut self, route: Route) -> Result<(), SolutionError> {
        let fleet_size = self.fleet_size();
        if self.routes.len() >= fleet_size {
            return Err(SolutionError::FleetExhausted { fleet_size });
        }
        self.routes.push(route);
        self.total_cost = self.routes.iter().map(Route::cost).sum();
        Ok(())
    }

    /// Removes and returns the route at `index`.
    pub fn remove_route(&mut self, index: usize) -> Result<Route, SolutionError> {
        if index >= self.routes.len() {
            return Err(SolutionError::RouteIndexOutOfRange {
                index,
                len: self.routes.len(),
            });
        }
        let route = self.routes.remove(index);
        self.total_cost = self.routes.iter().map(Route::cost).sum();
        Ok(route)
    }

    /// Returns `true` if no more routes are used than vehicles exist.
    pub fn is_feasible(&self) -> bool {
        self.routes.len() <= self.fleet_size()
    }

    /// Returns `true` if every route respects the vehicle capacity.
    pub fn routes_within_capacity(&self) -> bool {
        self.routes.iter().all(Route::is_feasible)
    }

    /// Returns `true` if every roster customer is visited exactly once and
    /// no route visits anything else.
    pub fn visits_all(&self) -> bool {
        let size = self.instance.distances().size();
        let mut seen = vec![false; size];
        let mut visited = 0;
        for route in &self.routes {
            for &id in route.customers() {
                if !self.instance.is_customer(id) || seen[id] {
                    return false;
                }
                seen[id] = true;
                visited += 1;
            }
        }
        visited == self.instance.num_customers()
    }

    /// Fleet-feasible, complete, and within capacity on every route.
    pub fn is_valid_tour(&self) -> bool {
        self.is_feasible() && self.visits_all() && self.routes_within_capacity()
    }

    /// Roster customers that no route visits, in roster order.
    ///
    /// Visits to ids outside the roster are ignored.
    pub fn unvisited(&self) -> Vec<usize> {
        let size = self.instance.distances().size();
        let mut seen = vec![false; size];
        for route in &self.routes {
            for &id in route.customers() {
                if self.instance.is_customer(id) {
                    seen[id] = true;
                }
            }
        }
        self.instance.customer_ids().filter(|&id| !seen[id]).collect()
    }

    /// The routes, in order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Consumes the solution and returns its routes.
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }

    /// Number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of customer visits across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// The customer roster.
    pub fn customers(&self) -> &[Customer] {
        self.instance.customers()
    }

    /// The distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        self.instance.distances()
    }

    /// The shared instance.
    pub fn instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    /// Sum of route costs.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Maximum number of routes.
    pub fn fleet_size(&self) -> usize {
        self.instance.fleet_size()
    }

    /// Total cost recomputed from the node sequences.
    pub fn recompute_cost(&self) -> f64 {
        let dm = self.instance.distances();
        self.routes.iter().map(|r| dm.path_length(r.nodes())).sum()
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solution")
            .field("routes", &self.routes)
            .field("total_cost", &self.total_cost)
            .field("fleet_size", &self.fleet_size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(fleet: usize) -> Arc<Instance> {
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 10.0, 20.0, 5.0],
            vec![10.0, 0.0, 15.0, 7.0],
            vec![20.0, 15.0, 0.0, 9.0],
            vec![5.0, 7.0, 9.0, 0.0],
        ])
        .expect("valid");
        let customers = vec![
            Customer::new(1, 5).expect("valid"),
            Customer::new(2, 3).expect("valid"),
            Customer::new(3, 4).expect("valid"),
        ];
        Arc::new(Instance::new(customers, dm, 10, 0, fleet).expect("valid"))
    }

    #[test]
    fn test_solution_empty() {
        let sol = Solution::new(instance(2));
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.total_cost(), 0.0);
        assert_eq!(sol.num_served(), 0);
        assert!(sol.is_feasible());
        assert!(!sol.visits_all());
        assert_eq!(sol.unvisited(), vec![1, 2, 3]);
    }

    #[test]
    fn test_add_and_remove_route() {
        let inst = instance(2);
        let mut sol = Solution::new(Arc::clone(&inst));
        sol.add_route(Route::new(Arc::clone(&inst), &[1, 2]))
            .expect("vehicle free");
        sol.add_route(Route::new(Arc::clone(&inst), &[3]))
            .expect("vehicle free");
        assert_eq!(sol.total_cost(), 55.0);
        assert!(sol.visits_all());
        assert!(sol.is_valid_tour());

        assert_eq!(
            sol.add_route(Route::empty(Arc::clone(&inst))),
            Err(SolutionError::FleetExhausted { fleet_size: 2 })
        );
        assert_eq!(sol.num_routes(), 2);

        let removed = sol.remove_route(0).expect("in range");
        assert_eq!(removed.customers(), &[1, 2]);
        assert_eq!(sol.total_cost(), 10.0);
        assert_eq!(
            sol.remove_route(4).unwrap_err(),
            SolutionError::RouteIndexOutOfRange { index: 4, len: 1 }
        );
        assert_eq!(sol.total_cost(), 10.0);
    }

    #[test]
    fn test_total_cost_stays_exact_across_add_remove() {
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 0.05, 0.1],
            vec![0.05, 0.0, 0.15],
            vec![0.1, 0.15, 0.0],
        ])
        .expect("valid");
        let customers = vec![
            Customer::new(1, 1).expect("valid"),
            Customer::new(2, 1).expect("valid"),
        ];
        let inst = Arc::new(Instance::new(customers, dm, 10, 0, 2).expect("valid"));
        let near = Route::new(Arc::clone(&inst), &[1]);
        let far = Route::new(Arc::clone(&inst), &[2]);

        let mut sol = Solution::new(Arc::clone(&inst));
        for _ in 0..100 {
            sol.add_route(near.clone()).expect("vehicle free");
            sol.add_route(far.clone()).expect("vehicle free");
            sol.remove_route(0).expect("in range");
            assert_eq!(sol.total_cost(), far.cost());
            sol.remove_route(0).expect("in range");
            assert_eq!(sol.total_cost(), 0.0);
        }

        sol.add_route(near).expect("vehicle free");
        sol.add_route(far).expect("vehicle free");
        assert_eq!(sol.total_cost(), sol.recompute_cost());
    }

    #[test]
    fn test_unvisited_ignores_foreign_ids() {
        let small = instance(2);
        let dm = DistanceMatrix::from_coordinates(&[
            (0, 0.0, 0.0),
            (1, 1.0, 0.0),
            (6, 2.0, 0.0),
        ]);
        let customers = vec![
            Customer::new(1, 1).expect("valid"),
            Customer::new(6, 1).expect("valid"),
        ];
        let large = Arc::new(Instance::new(customers, dm, 10, 0, 2).expect("valid"));
        let foreign = Route::new(large, &[6, 1]);

        let mut sol = Solution::new(Arc::clone(&small));
        sol.add_route(foreign).expect("vehicle free");
        assert_eq!(sol.unvisited(), vec![2, 3]);
        assert!(!sol.visits_all());
    }

    #[test]
    fn test_with_routes_over_fleet() {
        let inst = instance(1);
        let routes = vec![
            Route::new(Arc::clone(&inst), &[1]),
            Route::new(Arc::clone(&inst), &[2, 3]),
        ];
        let sol = Solution::with_routes(inst, routes);
        assert!(!sol.is_feasible());
        assert!(sol.visits_all());
        assert!(!sol.is_valid_tour());
        assert!((sol.total_cost() - sol.recompute_cost()).abs() < 1e-9);
    }

    #[test]
    fn test_visits_all_detects_duplicates() {
        let inst = instance(3);
        let routes = vec![
            Route::new(Arc::clone(&inst), &[1, 2]),
            Route::new(Arc::clone(&inst), &[2, 3]),
        ];
        let sol = Solution::with_routes(inst, routes);
        assert!(!sol.visits_all());
    }

    #[test]
    fn test_visits_all_detects_missing() {
        let inst = instance(3);
        let routes = vec![Route::new(Arc::clone(&inst), &[1, 3])];
        let sol = Solution::with_routes(inst, routes);
        assert!(!sol.visits_all());
        assert_eq!(sol.unvisited(), vec![2]);
    }

    #[test]
    fn test_routes_within_capacity() {
        let inst = instance(3);
        let routes = vec![Route::new(Arc::clone(&inst), &[1, 2, 3])];
        let sol = Solution::with_routes(inst, routes);
        assert!(sol.visits_all());
        assert!(!sol.routes_within_capacity());
    }

    #[test]
    fn test_clone_is_independent() {
        let inst = instance(2);
        let mut sol = Solution::new(Arc::clone(&inst));
        sol.add_route(Route::new(Arc::clone(&inst), &[1]))
            .expect("vehicle free");
        let snapshot = sol.clone();
        sol.remove_route(0).expect("in range");
        assert_eq!(snapshot.num_routes(), 1);
        assert_eq!(snapshot.total_cost(), 20.0);
    }
}
