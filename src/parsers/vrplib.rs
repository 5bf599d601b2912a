//! Reader for CVRP instances in the VRPLIB (TSPLIB) text format.
//!
//! Supported header keys are `NAME`, `DIMENSION`, `CAPACITY` and the
//! optional `VEHICLES`; other keys are ignored. Supported sections are
//! `NODE_COORD_SECTION`, `DEMAND_SECTION` and `DEPOT_SECTION` (terminated
//! by `-1`). Distances are Euclidean between node coordinates, indexed by
//! node id. Node ids must lie in `1..=DIMENSION`.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::distance::DistanceMatrix;
use crate::error::ParseError;
use crate::models::{Customer, Instance};

/// Raw contents of a VRPLIB file.
#[derive(Debug, Clone, PartialEq)]
pub struct VrpLibInstance {
    pub name: String,
    pub dimension: usize,
    pub capacity: i32,
    /// Value of the `VEHICLES` key, if present.
    pub vehicles: Option<usize>,
    pub depot: usize,
    /// `(id, x, y)` per node, in file order.
    pub coords: Vec<(usize, f64, f64)>,
    /// `(id, demand)` per node, in file order.
    pub demands: Vec<(usize, i64)>,
}

impl VrpLibInstance {
    /// Number of vehicles: `VEHICLES`, else the `-k<N>` name suffix, else
    /// one per customer.
    pub fn fleet_size(&self) -> usize {
        self.vehicles
            .or_else(|| fleet_from_name(&self.name))
            .unwrap_or(self.dimension.saturating_sub(1))
    }

    /// Builds the routing instance: every node except the depot becomes a
    /// customer.
    pub fn to_instance(&self) -> Result<Instance, ParseError> {
        self.check_node_ids()?;
        let demand_of: HashMap<usize, i64> = self.demands.iter().copied().collect();
        let mut customers = Vec::with_capacity(self.coords.len().saturating_sub(1));
        for &(id, _, _) in &self.coords {
            if id == self.depot {
                continue;
            }
            let demand = demand_of.get(&id).copied().unwrap_or_else(|| {
                warn!(node = id, "node has no demand entry, assuming 0");
                0
            });
            customers.push(Customer::from_raw(id as i64, demand)?);
        }

        let distances = DistanceMatrix::from_coordinates(&self.coords);
        let instance = Instance::new(
            customers,
            distances,
            self.capacity,
            self.depot,
            self.fleet_size(),
        )?;
        Ok(instance)
    }

    /// Rejects any coordinate, demand or depot id outside `1..=dimension`.
    pub fn check_node_ids(&self) -> Result<(), ParseError> {
        let ids = self
            .coords
            .iter()
            .map(|&(id, _, _)| id)
            .chain(self.demands.iter().map(|&(id, _)| id))
            .chain(std::iter::once(self.depot));
        for id in ids {
            if !(1..=self.dimension).contains(&id) {
                return Err(invalid("node id", &id.to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Coords,
    Demands,
    Depot,
    Other,
}

/// Parses VRPLIB text.
///
/// # Examples
///
/// ```
/// use cvrp_heuristics::parsers::vrplib;
///
/// let text = "NAME : tiny-n3-k1\nDIMENSION : 3\nCAPACITY : 10\n\
///             NODE_COORD_SECTION\n1 0 0\n2 3 4\n3 0 4\n\
///             DEMAND_SECTION\n1 0\n2 4\n3 5\n\
///             DEPOT_SECTION\n1\n-1\nEOF\n";
/// let raw = vrplib::parse(text).unwrap();
/// assert_eq!(raw.fleet_size(), 1);
///
/// let instance = raw.to_instance().unwrap();
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.distance(1, 2), 5.0);
/// ```
pub fn parse(text: &str) -> Result<VrpLibInstance, ParseError> {
    let mut name = String::new();
    let mut dimension: Option<usize> = None;
    let mut capacity: Option<i32> = None;
    let mut vehicles: Option<usize> = None;
    let mut depot: Option<usize> = None;
    let mut coords: Option<Vec<(usize, f64, f64)>> = None;
    let mut demands: Option<Vec<(usize, i64)>> = None;
    let mut section = Section::None;

    for line in text.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        if line == "EOF" {
            break;
        }

        if let Some((key, value)) = line.split_once(':') {
            let value = value.trim();
            match key.trim().to_uppercase().as_str() {
                "NAME" => name = value.to_string(),
                "DIMENSION" => dimension = Some(parse_value("DIMENSION", value)?),
                "CAPACITY" => capacity = Some(parse_value("CAPACITY", value)?),
                "VEHICLES" => vehicles = Some(parse_value("VEHICLES", value)?),
                _ => {}
            }
            section = Section::None;
            continue;
        }

        if line.ends_with("_SECTION") {
            section = match line {
                "NODE_COORD_SECTION" => {
                    coords.get_or_insert_with(Vec::new);
                    Section::Coords
                }
                "DEMAND_SECTION" => {
                    demands.get_or_insert_with(Vec::new);
                    Section::Demands
                }
                "DEPOT_SECTION" => Section::Depot,
                _ => Section::Other,
            };
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match section {
            Section::Coords => {
                let [id, x, y, ..] = parts[..] else {
                    return Err(invalid("NODE_COORD_SECTION", line));
                };
                let entry = (
                    parse_value("node id", id)?,
                    parse_value("x coordinate", x)?,
                    parse_value("y coordinate", y)?,
                );
                coords.get_or_insert_with(Vec::new).push(entry);
            }
            Section::Demands => {
                let [id, demand, ..] = parts[..] else {
                    return Err(invalid("DEMAND_SECTION", line));
                };
                let entry = (parse_value("node id", id)?, parse_value("demand", demand)?);
                demands.get_or_insert_with(Vec::new).push(entry);
            }
            Section::Depot => {
                for part in parts {
                    let id: i64 = parse_value("depot", part)?;
                    if id == -1 {
                        section = Section::None;
                        break;
                    }
                    let id = usize::try_from(id).map_err(|_| invalid("node id", part))?;
                    match depot {
                        None => depot = Some(id),
                        Some(first) => warn!(depot = id, first, "ignoring additional depot"),
                    }
                }
            }
            Section::None | Section::Other => {}
        }
    }

    let coords = coords.ok_or(ParseError::MissingField("NODE_COORD_SECTION"))?;
    let depot = depot
        .or_else(|| coords.first().map(|&(id, _, _)| id))
        .ok_or(ParseError::MissingField("DEPOT_SECTION"))?;

    let instance = VrpLibInstance {
        name,
        dimension: dimension.ok_or(ParseError::MissingField("DIMENSION"))?,
        capacity: capacity.ok_or(ParseError::MissingField("CAPACITY"))?,
        vehicles,
        depot,
        coords,
        demands: demands.ok_or(ParseError::MissingField("DEMAND_SECTION"))?,
    };
    instance.check_node_ids()?;
    debug!(
        name = %instance.name,
        dimension = instance.dimension,
        capacity = instance.capacity,
        fleet = instance.fleet_size(),
        "parsed vrplib instance"
    );
    Ok(instance)
}

/// Reads a VRPLIB file and builds the routing instance.
pub fn read_instance<P: AsRef<Path>>(path: P) -> Result<Instance, ParseError> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)?.to_instance()
}

fn parse_value<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| invalid(field, value))
}

fn invalid(field: &'static str, value: &str) -> ParseError {
    ParseError::InvalidValue {
        field,
        value: value.to_string(),
    }
}

fn fleet_from_name(name: &str) -> Option<usize> {
    let (_, suffix) = name.rsplit_once("-k")?;
    suffix.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
NAME : toy-n5-k2
COMMENT : (hand made, optimal value: unknown)
TYPE : CVRP
DIMENSION : 5
EDGE_WEIGHT_TYPE : EUC_2D
CAPACITY : 10
NODE_COORD_SECTION
 1 0 0
 2 3 4
 3 6 8
 4 -3 -4
 5 0 5
DEMAND_SECTION
1 0
2 4
3 5
4 6
5 3
DEPOT_SECTION
 1
 -1
EOF
"#;

    #[test]
    fn test_parse_sample() {
        let raw = parse(SAMPLE).expect("valid");
        assert_eq!(raw.name, "toy-n5-k2");
        assert_eq!(raw.dimension, 5);
        assert_eq!(raw.capacity, 10);
        assert_eq!(raw.vehicles, None);
        assert_eq!(raw.depot, 1);
        assert_eq!(raw.coords.len(), 5);
        assert_eq!(raw.coords[3], (4, -3.0, -4.0));
        assert_eq!(raw.demands[2], (3, 5));
        assert_eq!(raw.fleet_size(), 2);
    }

    #[test]
    fn test_sample_instance() {
        let instance = parse(SAMPLE).expect("valid").to_instance().expect("valid");
        assert_eq!(instance.depot(), 1);
        assert_eq!(instance.capacity(), 10);
        assert_eq!(instance.fleet_size(), 2);
        let ids: Vec<usize> = instance.customer_ids().collect();
        assert_eq!(ids, vec![2, 3, 4, 5]);
        assert_eq!(instance.demand(4), Some(6));
        assert_eq!(instance.total_demand(), 18);
        assert!((instance.distance(1, 2) - 5.0).abs() < 1e-10);
        assert!((instance.distance(2, 3) - 5.0).abs() < 1e-10);
        assert!((instance.distance(3, 4) - 15.0).abs() < 1e-10);
        assert!(instance.distances().is_symmetric(1e-10));
    }

    #[test]
    fn test_vehicles_key_wins() {
        let text = SAMPLE.replace("TYPE : CVRP", "TYPE : CVRP\nVEHICLES : 4");
        let raw = parse(&text).expect("valid");
        assert_eq!(raw.vehicles, Some(4));
        assert_eq!(raw.fleet_size(), 4);
    }

    #[test]
    fn test_fleet_defaults_to_customer_count() {
        let text = SAMPLE.replace("NAME : toy-n5-k2", "NAME : toy");
        assert_eq!(parse(&text).expect("valid").fleet_size(), 4);
    }

    #[test]
    fn test_missing_capacity() {
        let text = SAMPLE.replace("CAPACITY : 10\n", "");
        let err = parse(&text).unwrap_err();
        assert!(matches!(err, ParseError::MissingField("CAPACITY")));
    }

    #[test]
    fn test_invalid_demand() {
        let text = SAMPLE.replace("3 5\n", "3 five\n");
        let err = parse(&text).unwrap_err();
        match err {
            ParseError::InvalidValue { field, value } => {
                assert_eq!(field, "demand");
                assert_eq!(value, "five");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_demand_is_model_error() {
        let text = SAMPLE.replace("3 5\n", "3 -5\n");
        let err = parse(&text).expect("valid").to_instance().unwrap_err();
        assert!(matches!(err, ParseError::Model(_)));
    }

    fn assert_bad_node_id(err: ParseError, expected: &str) {
        match err {
            ParseError::InvalidValue { field, value } => {
                assert_eq!(field, "node id");
                assert_eq!(value, expected);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_coord_id_beyond_dimension() {
        let text = SAMPLE.replace(" 5 0 5", " 5000000000 3 4");
        assert_bad_node_id(parse(&text).unwrap_err(), "5000000000");
    }

    #[test]
    fn test_zero_coord_id() {
        let text = SAMPLE.replace(" 5 0 5", " 0 0 5");
        assert_bad_node_id(parse(&text).unwrap_err(), "0");
    }

    #[test]
    fn test_demand_id_beyond_dimension() {
        let text = SAMPLE.replace("5 3\n", "6 3\n");
        assert_bad_node_id(parse(&text).unwrap_err(), "6");
    }

    #[test]
    fn test_depot_id_out_of_range() {
        let text = SAMPLE.replace(" 1\n -1", " 9\n -1");
        assert_bad_node_id(parse(&text).unwrap_err(), "9");

        let text = SAMPLE.replace(" 1\n -1", " -3\n -1");
        assert_bad_node_id(parse(&text).unwrap_err(), "-3");
    }

    #[test]
    fn test_dimension_after_sections() {
        let text = SAMPLE.replace("DIMENSION : 5\n", "") + "DIMENSION : 5\n";
        let text = text.replace("EOF\n", "");
        let raw = parse(&text).expect("valid");
        assert_eq!(raw.dimension, 5);
    }

    #[test]
    fn test_to_instance_rechecks_ids() {
        let mut raw = parse(SAMPLE).expect("valid");
        raw.coords.push((5_000_000_000, 3.0, 4.0));
        assert_bad_node_id(raw.to_instance().unwrap_err(), "5000000000");
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_instance("/nonexistent/instance.vrp").unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
