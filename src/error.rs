//! Error types for the routing data model.
//!
//! Only [`ModelError`] is a hard failure: it is raised while building
//! customers and instances. [`RouteError`] and [`SolutionError`] are the
//! reason codes of soft-fail mutations, which leave their target untouched.
//! [`GraspError`] rejects a search configuration before any work starts.
//! [`ParseError`] reports a malformed VRPLIB instance file.

use thiserror::Error;

/// Invalid input data for a customer or an instance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("customer id must be non-negative, got {0}")]
    NegativeId(i64),
    #[error("customer {id} has negative demand {demand}")]
    NegativeDemand { id: usize, demand: i64 },
    #[error("value {0} does not fit the customer model")]
    ValueOutOfRange(i64),
    #[error("vehicle capacity must be non-negative, got {0}")]
    NegativeCapacity(i32),
    #[error("node {id} is outside the distance matrix of size {size}")]
    NodeOutsideMatrix { id: usize, size: usize },
    #[error("customer {0} uses the depot id")]
    DepotAsCustomer(usize),
    #[error("customer {0} appears more than once")]
    DuplicateCustomer(usize),
    #[error("distance matrix row {row} has {len} entries, expected {size}")]
    RaggedMatrix { row: usize, len: usize, size: usize },
    #[error("distance from {from} to {to} is negative or not finite")]
    InvalidDistance { from: usize, to: usize },
}

/// Reason a route mutation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error(
        "customer {customer} (demand {demand}) does not fit: load {load}, capacity {capacity}"
    )]
    CapacityExceeded {
        customer: usize,
        demand: i32,
        load: i64,
        capacity: i32,
    },
    #[error("customer {0} is not part of the instance")]
    UnknownCustomer(usize),
    #[error("the depot {0} cannot be visited inside a route")]
    DepotNotAllowed(usize),
    #[error("customer {0} is already on the route")]
    AlreadyPresent(usize),
    #[error("customer {0} is not on the route")]
    NotInRoute(usize),
    #[error("insertion position {position} is outside 0..={len}")]
    PositionOutOfRange { position: usize, len: usize },
}

/// Reason a solution mutation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolutionError {
    #[error("all {fleet_size} vehicles already have a route")]
    FleetExhausted { fleet_size: usize },
    #[error("route index {index} is out of range for {len} routes")]
    RouteIndexOutOfRange { index: usize, len: usize },
}

/// Invalid GRASP configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraspError {
    #[error("restricted candidate list size must be at least 1")]
    EmptyCandidateList,
}

/// Failure to read or interpret a VRPLIB instance.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read instance file: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing {0}")]
    MissingField(&'static str),
    #[error("invalid {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },
    #[error(transparent)]
    Model(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let e = RouteError::CapacityExceeded {
            customer: 3,
            demand: 8,
            load: 5,
            capacity: 10,
        };
        assert_eq!(
            e.to_string(),
            "customer 3 (demand 8) does not fit: load 5, capacity 10"
        );
        assert_eq!(
            SolutionError::FleetExhausted { fleet_size: 2 }.to_string(),
            "all 2 vehicles already have a route"
        );
    }
}
