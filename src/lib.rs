//! # cvrp-heuristics
//!
//! Capacitated vehicle routing (CVRP) library providing the routing data
//! model, construction heuristics, and inter-route local search.
//!
//! ## Modules
//!
//! - [`models`] - Domain model types (Customer, Instance, Route, Solution)
//! - [`distance`] - Id-indexed distance matrix
//! - [`constructive`] - Construction heuristics (Clarke-Wright, Nearest Insertion)
//! - [`grasp`] - Randomized greedy construction with restricted candidate lists
//! - [`local_search`] - Swap and Relocate operators, iterated to a local optimum
//! - [`parsers`] - VRPLIB instance reader
//! - [`report`] - Serializable solution summaries
//! - [`error`] - Error and soft-fail reason types
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use cvrp_heuristics::constructive::clarke_wright_savings;
//! use cvrp_heuristics::distance::DistanceMatrix;
//! use cvrp_heuristics::local_search::iterated_local_search;
//! use cvrp_heuristics::models::{Customer, Instance};
//!
//! let dm = DistanceMatrix::from_coordinates(&[
//!     (0, 0.0, 0.0),
//!     (1, 4.0, 3.0),
//!     (2, 4.0, -3.0),
//!     (3, -4.0, 3.0),
//!     (4, -4.0, -3.0),
//! ]);
//! let customers = (1..5).map(|id| Customer::new(id, 5).unwrap()).collect();
//! let instance = Arc::new(Instance::new(customers, dm, 10, 0, 2).unwrap());
//!
//! let start = clarke_wright_savings(&instance);
//! let outcome = iterated_local_search(&start);
//! assert!(outcome.solution.is_feasible());
//! assert!(outcome.solution.visits_all());
//! assert!(outcome.solution.total_cost() <= start.total_cost());
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod grasp;
pub mod local_search;
pub mod models;
pub mod parsers;
pub mod report;
