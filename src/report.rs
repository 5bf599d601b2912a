//! Serializable summaries of solutions.

use serde::Serialize;

use crate::models::{Route, Solution};

/// One route in a [`SolutionReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteReport {
    /// Depot-bounded node sequence.
    pub nodes: Vec<usize>,
    pub demand: i64,
    pub cost: f64,
}

/// Snapshot of a solution for logging or export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionReport {
    pub total_cost: f64,
    pub num_routes: usize,
    pub fleet_size: usize,
    pub feasible: bool,
    pub visits_all: bool,
    pub routes: Vec<RouteReport>,
}

impl SolutionReport {
    /// Renders the report as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&Route> for RouteReport {
    fn from(route: &Route) -> Self {
        Self {
            nodes: route.nodes().to_vec(),
            demand: route.demand(),
            cost: route.cost(),
        }
    }
}

impl Solution {
    /// Summarizes this solution.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use cvrp_heuristics::constructive::clarke_wright_savings;
    /// use cvrp_heuristics::distance::DistanceMatrix;
    /// use cvrp_heuristics::models::{Customer, Instance};
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
    /// let report = clarke_wright_savings(&instance).report();
    /// assert_eq!(report.num_routes, 1);
    /// assert_eq!(report.routes[0].nodes, vec![0, 1, 2, 0]);
    /// assert_eq!(report.routes[0].demand, 8);
    /// assert!(report.feasible && report.visits_all);
    /// ```
    pub fn report(&self) -> SolutionReport {
        SolutionReport {
            total_cost: self.total_cost(),
            num_routes: self.num_routes(),
            fleet_size: self.fleet_size(),
            feasible: self.is_feasible(),
            visits_all: self.visits_all(),
            routes: self.routes().iter().map(RouteReport::from).collect(),
        }
    }
}
