//! Iterated swap/relocate descent.
//!
//! Each round runs one [`swap_improve`] pass and one [`relocate_improve`]
//! pass, keeping each result only if it lowers the total cost. The loop
//! stops after the first round in which neither operator improved.

use std::sync::Arc;

use tracing::debug;

use crate::constructive::clarke_wright_savings;
use crate::models::{Instance, Solution};

use super::{relocate_improve, swap_improve, IMPROVEMENT_EPSILON};

/// Result of [`iterated_local_search`].
#[derive(Debug, Clone)]
pub struct LocalSearchOutcome {
    /// Best solution reached.
    pub solution: Solution,
    /// Number of rounds that improved the solution.
    pub rounds: usize,
    /// Total cost of the starting solution.
    pub initial_cost: f64,
}

impl LocalSearchOutcome {
    /// Cost removed relative to the starting solution.
    pub fn improvement(&self) -> f64 {
        self.initial_cost - self.solution.total_cost()
    }
}

/// Repeats swap then relocate until neither lowers the cost.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use cvrp_heuristics::distance::DistanceMatrix;
/// use cvrp_heuristics::models::{Customer, Instance, Route, Solution};
/// use cvrp_heuristics::local_search::iterated_local_search;
///
/// let dm = DistanceMatrix::from_coordinates(&[
///     (0, 0.0, 0.0),
///     (1, 10.0, 0.0),
///     (2, 10.0, 1.0),
/// ]);
/// let customers = (1..3).map(|id| Customer::new(id, 1).unwrap()).collect();
/// let instance = Arc::new(Instance::new(customers, dm, 10, 0, 2).unwrap());
/// let start = Solution::with_routes(
///     Arc::clone(&instance),
///     vec![
///         Route::new(Arc::clone(&instance), &[1]),
///         Route::new(Arc::clone(&instance), &[2]),
///     ],
/// );
///
/// let outcome = iterated_local_search(&start);
/// assert_eq!(outcome.solution.num_routes(), 1);
/// assert!(outcome.improvement() > 0.0);
/// ```
pub fn iterated_local_search(solution: &Solution) -> LocalSearchOutcome {
    let initial_cost = solution.total_cost();
    let mut current = solution.clone();
    let mut rounds = 0;

    loop {
        let mut improved = false;

        let swapped = swap_improve(&current);
        if swapped.total_cost() < current.total_cost() - IMPROVEMENT_EPSILON {
            current = swapped;
            improved = true;
        }

        let relocated = relocate_improve(&current);
        if relocated.total_cost() < current.total_cost() - IMPROVEMENT_EPSILON {
            current = relocated;
            improved = true;
        }

        if !improved {
            break;
        }
        rounds += 1;
        debug!(
            round = rounds,
            cost = current.total_cost(),
            routes = current.num_routes(),
            "local search round improved"
        );
    }

    LocalSearchOutcome {
        solution: current,
        rounds,
        initial_cost,
    }
}

/// Clarke-Wright construction followed by [`iterated_local_search`].
pub fn clarke_wright_with_local_search(instance: &Arc<Instance>) -> Solution {
    let start = clarke_wright_savings(instance);
    iterated_local_search(&start).solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::{Customer, Route};

    fn grid_instance(capacity: i32, fleet: usize) -> Arc<Instance> {
        let mut points = vec![(0, 0.0, 0.0)];
        let coords = [
            (3.0, 1.0),
            (-2.0, 4.0),
            (5.0, -3.0),
            (-4.0, -4.0),
            (1.0, 6.0),
            (6.0, 2.0),
            (-6.0, 1.0),
            (2.0, -5.0),
        ];
        for (i, &(x, y)) in coords.iter().enumerate() {
            points.push((i + 1, x, y));
        }
        let dm = DistanceMatrix::from_coordinates(&points);
        let customers = (1..=coords.len())
            .map(|id| Customer::new(id, 3).expect("valid"))
            .collect();
        Arc::new(Instance::new(customers, dm, capacity, 0, fleet).expect("valid"))
    }

    #[test]
    fn test_ils_never_worsens() {
        let inst = grid_instance(9, 8);
        // Deliberately poor start: customers paired in roster order.
        let start = Solution::with_routes(
            Arc::clone(&inst),
            vec![
                Route::new(Arc::clone(&inst), &[1, 4]),
                Route::new(Arc::clone(&inst), &[2, 3]),
                Route::new(Arc::clone(&inst), &[5, 8]),
                Route::new(Arc::clone(&inst), &[6, 7]),
            ],
        );
        let outcome = iterated_local_search(&start);
        assert!(outcome.solution.total_cost() <= start.total_cost() + 1e-10);
        assert!(outcome.improvement() >= -1e-10);
        assert!(outcome.solution.visits_all());
        assert!(outcome.solution.routes_within_capacity());
        assert!((outcome.initial_cost - start.total_cost()).abs() < 1e-10);
    }

    #[test]
    fn test_ils_result_is_local_optimum() {
        let inst = grid_instance(9, 8);
        let start = clarke_wright_savings(&inst);
        let outcome = iterated_local_search(&start);
        let again = iterated_local_search(&outcome.solution);
        assert_eq!(again.rounds, 0);
        assert_eq!(again.solution.total_cost(), outcome.solution.total_cost());
    }

    #[test]
    fn test_ils_zero_rounds_on_single_route() {
        let inst = grid_instance(100, 1);
        let start = Solution::with_routes(
            Arc::clone(&inst),
            vec![Route::new(Arc::clone(&inst), &[1, 2, 3, 4, 5, 6, 7, 8])],
        );
        let outcome = iterated_local_search(&start);
        assert_eq!(outcome.rounds, 0);
        assert_eq!(outcome.improvement(), 0.0);
        assert_eq!(outcome.solution.routes(), start.routes());
    }

    #[test]
    fn test_cw_with_local_search_not_worse_than_cw() {
        let inst = grid_instance(9, 8);
        let cw = clarke_wright_savings(&inst);
        let improved = clarke_wright_with_local_search(&inst);
        assert!(improved.total_cost() <= cw.total_cost() + 1e-10);
        assert!(improved.visits_all());
        assert!(improved.routes_within_capacity());
        assert!((improved.total_cost() - improved.recompute_cost()).abs() < 1e-9);
    }
}
