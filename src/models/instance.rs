//! Shared, read-only problem context.

use std::collections::HashSet;

use crate::distance::DistanceMatrix;
use crate::error::ModelError;

use super::Customer;

/// A CVRP instance: customer roster, distances, capacity, depot and fleet.
///
/// An instance is built once and then shared behind an `Arc` by every
/// route and solution; nothing in the crate mutates it.
///
/// # Examples
///
/// ```
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
/// let instance = Instance::new(customers, dm, 10, 0, 2).unwrap();
///
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.demand(2), Some(3));
/// assert_eq!(instance.demand(0), None);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    customers: Vec<Customer>,
    distances: DistanceMatrix,
    capacity: i32,
    depot: usize,
    fleet_size: usize,
    // demand_by_id[id] is Some for roster customers only
    demand_by_id: Vec<Option<i32>>,
}

impl Instance {
    /// Creates an instance whose matrix is indexed by node id.
    pub fn new(
        customers: Vec<Customer>,
        distances: DistanceMatrix,
        capacity: i32,
        depot: usize,
        fleet_size: usize,
    ) -> Result<Self, ModelError> {
        if capacity < 0 {
            return Err(ModelError::NegativeCapacity(capacity));
        }
        let size = distances.size();
        if !distances.contains(depot) {
            return Err(ModelError::NodeOutsideMatrix { id: depot, size });
        }

        let mut demand_by_id = vec![None; size];
        for c in &customers {
            let id = c.id();
            if id == depot {
                return Err(ModelError::DepotAsCustomer(id));
            }
            if !distances.contains(id) {
                return Err(ModelError::NodeOutsideMatrix { id, size });
            }
            if demand_by_id[id].is_some() {
                return Err(ModelError::DuplicateCustomer(id));
            }
            demand_by_id[id] = Some(c.demand());
        }

        Ok(Self {
            customers,
            distances,
            capacity,
            depot,
            fleet_size,
            demand_by_id,
        })
    }

    /// Creates an instance from a matrix indexed by position instead of id.
    ///
    /// Position 0 is the depot and position `i + 1` is `customers[i]`. The
    /// matrix is re-indexed by id once, so the heuristics never need an
    /// id-to-position map.
    pub fn from_positional(
        customers: Vec<Customer>,
        positional: &DistanceMatrix,
        capacity: i32,
        depot: usize,
        fleet_size: usize,
    ) -> Result<Self, ModelError> {
        let positions = customers.len() + 1;
        if positional.size() < positions {
            return Err(ModelError::NodeOutsideMatrix {
                id: customers.len(),
                size: positional.size(),
            });
        }

        let ids: Vec<usize> = std::iter::once(depot)
            .chain(customers.iter().map(Customer::id))
            .collect();
        let mut seen = HashSet::with_capacity(ids.len());
        for &id in &ids {
            if !seen.insert(id) {
                return Err(if id == depot {
                    ModelError::DepotAsCustomer(id)
                } else {
                    ModelError::DuplicateCustomer(id)
                });
            }
        }

        let size = ids.iter().max().map_or(0, |&m| m + 1);
        let mut distances = DistanceMatrix::new(size);
        for (p, &from) in ids.iter().enumerate() {
            for (q, &to) in ids.iter().enumerate() {
                distances.set(from, to, positional.get(p, q));
            }
        }

        Self::new(customers, distances, capacity, depot, fleet_size)
    }

    /// The customer roster, in input order (depot excluded).
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Ids of the roster, in input order.
    pub fn customer_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.customers.iter().map(Customer::id)
    }

    /// The id-indexed distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Distance between two nodes.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Vehicle capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Depot node id.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Number of vehicles available.
    pub fn fleet_size(&self) -> usize {
        self.fleet_size
    }

    /// Number of customers (depot excluded).
    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    /// Demand of a roster customer, `None` for the depot or unknown ids.
    pub fn demand(&self, id: usize) -> Option<i32> {
        self.demand_by_id.get(id).copied().flatten()
    }

    /// Returns `true` if `id` is a roster customer.
    pub fn is_customer(&self, id: usize) -> bool {
        self.demand(id).is_some()
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> i64 {
        self.customers.iter().map(|c| i64::from(c.demand())).sum()
    }

    /// Lower bound on the number of vehicles needed by capacity alone.
    pub fn min_vehicles(&self) -> usize {
        let total = self.total_demand();
        if total == 0 {
            return 0;
        }
        if self.capacity == 0 {
            return usize::MAX;
        }
        let cap = i64::from(self.capacity);
        ((total + cap - 1) / cap) as usize
    }
}
