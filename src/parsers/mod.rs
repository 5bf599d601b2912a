//! Instance file readers.
//!
//! - [`vrplib`] - VRPLIB/TSPLIB CVRP format with Euclidean distances

pub mod vrplib;
