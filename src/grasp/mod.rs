//! GRASP (Greedy Randomized Adaptive Search Procedure) for the CVRP.
//!
//! # Algorithm
//!
//! Each iteration builds a solution with [`construct_with_rcl`], which
//! extends a route by drawing uniformly among the k nearest unvisited
//! customers (the restricted candidate list). The candidate then gets one
//! swap pass and one relocate pass. Candidates that exceed the fleet or
//! leave customers unvisited are discarded; the cheapest remaining one is
//! kept, with ties going to the earliest.
//!
//! The random engine is explicit: [`Grasp::run`] seeds a fresh engine per
//! call from [`GraspConfig::seed`] (or OS entropy), while
//! [`Grasp::run_with_rng`] draws from an engine owned by the caller.
//!
//! # Complexity
//!
//! O(iterations · n² log n) for construction plus the local search passes.
//!
//! # Reference
//!
//! Feo, T.A. & Resende, M.G.C. (1995). "Greedy Randomized Adaptive Search
//! Procedures", *Journal of Global Optimization* 6, 109-133.

mod config;
mod runner;

pub use config::GraspConfig;
pub use runner::{construct_with_rcl, Grasp, GraspResult};
