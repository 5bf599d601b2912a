//! Constructive heuristics for building initial CVRP solutions.
//!
//! - [`clarke_wright_savings`] - Clarke-Wright savings algorithm (1964), O(n² log n)
//! - [`nearest_insertion`] - Greedy nearest extension with append or cheapest-position placement, O(n²)
//! - [`Grasp`](crate::grasp::Grasp) - Randomized greedy construction with local search
//!
//! All three implement [`ConstructionHeuristic`], so callers can swap them
//! behind one interface.

use std::sync::Arc;

use crate::models::{Instance, Solution};

mod clarke_wright;
mod nearest_insertion;

pub use clarke_wright::clarke_wright_savings;
pub use nearest_insertion::{nearest_insertion, InsertionPolicy};

/// A procedure that builds a solution for an instance.
pub trait ConstructionHeuristic {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &str;

    /// Builds a solution. The result may exceed the fleet or leave
    /// customers unvisited; check [`Solution::is_feasible`] and
    /// [`Solution::visits_all`].
    fn construct(&self, instance: &Arc<Instance>) -> Solution;
}

/// [`clarke_wright_savings`] as a [`ConstructionHeuristic`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ClarkeWright;

impl ConstructionHeuristic for ClarkeWright {
    fn name(&self) -> &str {
        "clarke-wright"
    }

    fn construct(&self, instance: &Arc<Instance>) -> Solution {
        clarke_wright_savings(instance)
    }
}

/// [`nearest_insertion`] as a [`ConstructionHeuristic`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestInsertion {
    pub policy: InsertionPolicy,
}

impl ConstructionHeuristic for NearestInsertion {
    fn name(&self) -> &str {
        match self.policy {
            InsertionPolicy::AppendNearest => "nearest-insertion",
            InsertionPolicy::CheapestPosition => "nearest-insertion-cheapest",
        }
    }

    fn construct(&self, instance: &Arc<Instance>) -> Solution {
        nearest_insertion(instance, self.policy)
    }
}
