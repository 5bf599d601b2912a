//! Domain model types for the capacitated vehicle routing problem.
//!
//! Provides the core abstractions: customers with demands, the shared
//! read-only instance, depot-bounded routes, and solutions made of routes.

mod customer;
mod instance;
mod route;
mod solution;

pub use customer::Customer;
pub use instance::Instance;
pub use route::Route;
pub use solution::Solution;
