//! Distance matrices.
//!
//! Provides the dense, id-indexed distance matrix shared by every
//! heuristic and operator.

mod matrix;

pub use matrix::DistanceMatrix;
