//! GRASP construction and search loop.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

use crate::constructive::ConstructionHeuristic;
use crate::error::GraspError;
use crate::local_search::{relocate_improve, swap_improve};
use crate::models::{Instance, Route, Solution};

use super::GraspConfig;

/// Outcome of a GRASP run.
#[derive(Debug, Clone)]
pub struct GraspResult {
    /// Best feasible, fully covering solution; empty if none was found.
    pub solution: Solution,
    /// Cost of `solution`, or `f64::INFINITY` if none was found.
    pub best_cost: f64,
    /// Whether any iteration produced an acceptable candidate.
    pub feasible_found: bool,
    /// Iterations executed.
    pub iterations: usize,
    /// Iterations whose candidate passed the feasibility and coverage check.
    pub accepted: usize,
}

/// Greedy randomized adaptive search over an instance.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use cvrp_heuristics::distance::DistanceMatrix;
/// use cvrp_heuristics::grasp::{Grasp, GraspConfig};
/// use cvrp_heuristics::models::{Customer, Instance};
///
/// let points: Vec<(usize, f64, f64)> = (0..6).map(|i| (i, i as f64, (i % 2) as f64)).collect();
/// let dm = DistanceMatrix::from_coordinates(&points);
/// let customers = (1..6).map(|id| Customer::new(id, 2).unwrap()).collect();
/// let instance = Arc::new(Instance::new(customers, dm, 6, 0, 2).unwrap());
///
/// let config = GraspConfig::default().with_max_iterations(20).with_seed(42);
/// let result = Grasp::new(instance, config).unwrap().run();
/// assert!(result.feasible_found);
/// assert!(result.solution.visits_all());
/// assert!(result.solution.is_feasible());
/// ```
#[derive(Debug, Clone)]
pub struct Grasp {
    instance: Arc<Instance>,
    config: GraspConfig,
}

impl Grasp {
    /// Creates a runner after validating `config`.
    pub fn new(instance: Arc<Instance>, config: GraspConfig) -> Result<Self, GraspError> {
        config.validate()?;
        Ok(Self { instance, config })
    }

    pub fn config(&self) -> &GraspConfig {
        &self.config
    }

    pub fn instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    /// Runs with a fresh engine: seeded from the config, or from OS entropy.
    pub fn run(&self) -> GraspResult {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.run_with_rng(&mut rng)
    }

    /// Runs with a caller-owned engine, so repeated runs can share one stream.
    pub fn run_with_rng<R: Rng>(&self, rng: &mut R) -> GraspResult {
        let k = self.config.rcl_size;
        let mut best: Option<Solution> = None;
        let mut accepted = 0;

        for iteration in 0..self.config.max_iterations {
            let candidate = construct_with_rcl(&self.instance, k, rng);
            let candidate = swap_improve(&candidate);
            let candidate = relocate_improve(&candidate);

            if !candidate.is_feasible() || !candidate.visits_all() {
                trace!(
                    iteration,
                    routes = candidate.num_routes(),
                    unvisited = candidate.unvisited().len(),
                    "grasp candidate rejected"
                );
                continue;
            }
            accepted += 1;

            if best
                .as_ref()
                .is_none_or(|b| candidate.total_cost() < b.total_cost())
            {
                trace!(iteration, cost = candidate.total_cost(), "grasp incumbent updated");
                best = Some(candidate);
            }
        }

        let iterations = self.config.max_iterations;
        match best {
            Some(solution) => {
                let best_cost = solution.total_cost();
                debug!(iterations, accepted, best_cost, "grasp finished");
                GraspResult {
                    solution,
                    best_cost,
                    feasible_found: true,
                    iterations,
                    accepted,
                }
            }
            None => {
                warn!(iterations, "grasp found no feasible solution visiting every customer");
                GraspResult {
                    solution: Solution::new(Arc::clone(&self.instance)),
                    best_cost: f64::INFINITY,
                    feasible_found: false,
                    iterations,
                    accepted,
                }
            }
        }
    }
}

impl ConstructionHeuristic for Grasp {
    fn name(&self) -> &str {
        "grasp"
    }

    fn construct(&self, instance: &Arc<Instance>) -> Solution {
        let runner = Self {
            instance: Arc::clone(instance),
            config: self.config.clone(),
        };
        runner.run().solution
    }
}

/// Builds one randomized greedy solution.
///
/// Each route starts at the depot and repeatedly draws, uniformly, one of
/// the `k` unvisited customers nearest to the last node placed. A drawn
/// customer that does not fit closes the route. Construction stops once
/// every customer is placed or a fresh route takes nothing.
///
/// The fleet size is not enforced; check [`Solution::is_feasible`].
pub fn construct_with_rcl<R: Rng>(
    instance: &Arc<Instance>,
    k: usize,
    rng: &mut R,
) -> Solution {
    let dm = instance.distances();
    let mut unvisited: Vec<usize> = instance.customer_ids().collect();
    let mut routes = Vec::new();

    while !unvisited.is_empty() {
        let mut route = Route::empty(Arc::clone(instance));
        let mut current = instance.depot();

        loop {
            let rcl = dm.k_nearest(current, &unvisited, k);
            if rcl.is_empty() {
                break;
            }
            let chosen = rcl[rng.random_range(0..rcl.len())];
            if route.push_customer(chosen).is_err() {
                break;
            }
            unvisited.retain(|&id| id != chosen);
            current = chosen;
        }

        if route.is_empty() {
            break;
        }
        routes.push(route);
    }

    Solution::with_routes(Arc::clone(instance), routes)
}
