//! Depot-bounded vehicle route.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::error::RouteError;

use super::Instance;

/// An ordered sequence of customer visits for one vehicle.
///
/// The node sequence always starts and ends at the depot:
/// `[depot, c1, ..., ck, depot]`. Demand and cost are recomputed from
/// scratch after every mutation, so they always match the sequence.
/// Loads are summed in `i64`, so any mix of `i32` demands is representable.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use cvrp_heuristics::distance::DistanceMatrix;
/// use cvrp_heuristics::models::{Customer, Instance, Route};
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
/// let mut route = Route::new(Arc::clone(&instance), &[1]);
/// assert_eq!(route.nodes(), &[0, 1, 0]);
/// route.push_customer(2).unwrap();
/// assert_eq!(route.nodes(), &[0, 1, 2, 0]);
/// assert_eq!(route.cost(), 45.0);
/// assert_eq!(route.demand(), 8);
/// ```
#[derive(Clone)]
pub struct Route {
    nodes: Vec<usize>,
    capacity: i32,
    depot: usize,
    demand: i64,
    cost: f64,
    instance: Arc<Instance>,
}

impl Route {
    /// Builds a route visiting `customers` in order.
    ///
    /// Depot ids in the input are dropped, so depot-bounded and unbounded
    /// sequences are both accepted. Unknown and repeated ids are dropped
    /// with a warning. The result may exceed capacity; check
    /// [`is_feasible`](Self::is_feasible).
    pub fn new(instance: Arc<Instance>, customers: &[usize]) -> Self {
        let depot = instance.depot();
        let mut nodes = Vec::with_capacity(customers.len() + 2);
        nodes.push(depot);
        for &id in customers {
            if id == depot {
                continue;
            }
            if !instance.is_customer(id) {
                warn!(customer = id, "dropping unknown customer from route");
                continue;
            }
            if nodes[1..].contains(&id) {
                warn!(customer = id, "dropping repeated customer from route");
                continue;
            }
            nodes.push(id);
        }
        nodes.push(depot);

        let mut route = Self {
            nodes,
            capacity: instance.capacity(),
            depot,
            demand: 0,
            cost: 0.0,
            instance,
        };
        route.recompute();
        route
    }

    /// Creates a route with no customers (`[depot, depot]`).
    pub fn empty(instance: Arc<Instance>) -> Self {
        Self::new(instance, &[])
    }

    /// Appends a customer just before the closing depot.
    ///
    /// On error the route is left unchanged.
    pub fn push_customer(&mut self, id: usize) -> Result<(), RouteError> {
        let len = self.len();
        self.insert_customer(len, id)
    }

    /// Inserts a customer at interior position `position` (`0..=len`).
    ///
    /// Position 0 is right after the opening depot; `len` is right before
    /// the closing depot. On error the route is left unchanged.
    pub fn insert_customer(&mut self, position: usize, id: usize) -> Result<(), RouteError> {
        let demand = self.check_insertable(id)?;
        let len = self.len();
        if position > len {
            return Err(RouteError::PositionOutOfRange { position, len });
        }
        if self.demand + i64::from(demand) > i64::from(self.capacity) {
            return Err(RouteError::CapacityExceeded {
                customer: id,
                demand,
                load: self.demand,
                capacity: self.capacity,
            });
        }
        self.nodes.insert(position + 1, id);
        self.recompute();
        Ok(())
    }

    /// Removes the first occurrence of a customer.
    ///
    /// Returns [`RouteError::NotInRoute`] when the customer is absent,
    /// including on an empty route.
    pub fn remove_customer(&mut self, id: usize) -> Result<(), RouteError> {
        let pos = self
            .customers()
            .iter()
            .position(|&c| c == id)
            .ok_or(RouteError::NotInRoute(id))?;
        self.nodes.remove(pos + 1);
        self.recompute();
        Ok(())
    }

    /// Cost change of inserting `id` at interior position `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position > len`.
    pub fn insertion_delta(&self, position: usize, id: usize) -> f64 {
        let a = self.nodes[position];
        let b = self.nodes[position + 1];
        let dm = self.instance.distances();
        dm.get(a, id) + dm.get(id, b) - dm.get(a, b)
    }

    /// Cheapest interior position for `id`, with its cost change.
    ///
    /// Ties go to the earliest position. Capacity is not checked.
    pub fn cheapest_insertion(&self, id: usize) -> (usize, f64) {
        let mut best = (0, self.insertion_delta(0, id));
        for position in 1..=self.len() {
            let delta = self.insertion_delta(position, id);
            if delta < best.1 {
                best = (position, delta);
            }
        }
        best
    }

    /// Interior customers, depots excluded.
    pub fn customers(&self) -> &[usize] {
        &self.nodes[1..self.nodes.len() - 1]
    }

    /// Full node sequence, depots included.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Number of customers on this route.
    pub fn len(&self) -> usize {
        self.nodes.len() - 2
    }

    /// Returns `true` if the route visits no customer.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the route visits `id`.
    pub fn contains(&self, id: usize) -> bool {
        self.customers().contains(&id)
    }

    /// Total length of the node sequence.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Sum of the customers' demands.
    pub fn demand(&self) -> i64 {
        self.demand
    }

    /// Vehicle capacity this route was built with.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Capacity left on this route (negative when overloaded).
    pub fn remaining_capacity(&self) -> i64 {
        i64::from(self.capacity) - self.demand
    }

    /// Depot id.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Returns `true` if the demand fits the capacity.
    pub fn is_feasible(&self) -> bool {
        self.demand <= i64::from(self.capacity)
    }

    /// The shared instance this route refers to.
    pub fn instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    fn check_insertable(&self, id: usize) -> Result<i32, RouteError> {
        if id == self.depot {
            return Err(RouteError::DepotNotAllowed(id));
        }
        let demand = self
            .instance
            .demand(id)
            .ok_or(RouteError::UnknownCustomer(id))?;
        if self.contains(id) {
            return Err(RouteError::AlreadyPresent(id));
        }
        Ok(demand)
    }

    fn recompute(&mut self) {
        self.demand = self
            .customers()
            .iter()
            .filter_map(|&c| self.instance.demand(c))
            .map(i64::from)
            .sum();
        self.cost = self.instance.distances().path_length(&self.nodes);
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes && self.capacity == other.capacity && self.depot == other.depot
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("nodes", &self.nodes)
            .field("demand", &self.demand)
            .field("capacity", &self.capacity)
            .field("cost", &self.cost)
            .finish()
    }
}
