//! Customer type.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A customer with a delivery demand.
///
/// Customers are immutable once built. The id is the node id used to index
/// the distance matrix; the depot is not a customer.
///
/// # Examples
///
/// ```
/// use cvrp_heuristics::models::Customer;
///
/// let c = Customer::new(1, 10).unwrap();
/// assert_eq!(c.id(), 1);
/// assert_eq!(c.demand(), 10);
///
/// assert!(Customer::new(2, -1).is_err());
/// assert!(Customer::from_raw(-3, 4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCustomer", into = "RawCustomer")]
pub struct Customer {
    id: usize,
    demand: i32,
}

#[derive(Serialize, Deserialize)]
struct RawCustomer {
    id: i64,
    demand: i64,
}

impl Customer {
    /// Creates a customer, rejecting a negative demand.
    pub fn new(id: usize, demand: i32) -> Result<Self, ModelError> {
        if demand < 0 {
            return Err(ModelError::NegativeDemand {
                id,
                demand: i64::from(demand),
            });
        }
        Ok(Self { id, demand })
    }

    /// Creates a customer from raw parsed integers.
    ///
    /// Rejects negative ids, negative demands, and values that do not fit.
    pub fn from_raw(id: i64, demand: i64) -> Result<Self, ModelError> {
        if id < 0 {
            return Err(ModelError::NegativeId(id));
        }
        let id = usize::try_from(id).map_err(|_| ModelError::ValueOutOfRange(id))?;
        if demand < 0 {
            return Err(ModelError::NegativeDemand { id, demand });
        }
        let demand = i32::try_from(demand).map_err(|_| ModelError::ValueOutOfRange(demand))?;
        Ok(Self { id, demand })
    }

    /// Node id of this customer.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Units to deliver.
    pub fn demand(&self) -> i32 {
        self.demand
    }
}

impl TryFrom<RawCustomer> for Customer {
    type Error = ModelError;

    fn try_from(raw: RawCustomer) -> Result<Self, Self::Error> {
        Self::from_raw(raw.id, raw.demand)
    }
}

impl From<Customer> for RawCustomer {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id as i64,
            demand: i64::from(c.demand),
        }
    }
}
