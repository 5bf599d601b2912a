//! Dense distance matrix indexed by node id.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A dense n×n distance matrix stored in row-major order.
///
/// Rows and columns are node ids, so the matrix must be at least
/// `max_id + 1` wide. Ids the instance never uses simply hold zeros.
///
/// # Examples
///
/// ```
/// use cvrp_heuristics::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 10.0, 20.0],
///     vec![10.0, 0.0, 15.0],
///     vec![20.0, 15.0, 0.0],
/// ])
/// .unwrap();
/// assert_eq!(dm.get(0, 2), 20.0);
/// assert_eq!(dm.size(), 3);
/// assert!(dm.is_symmetric(1e-10));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a distance matrix from nested rows.
    ///
    /// Every row must have as many entries as there are rows, and every
    /// distance must be finite and non-negative.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ModelError> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(ModelError::RaggedMatrix {
                    row,
                    len: values.len(),
                    size,
                });
            }
            for (col, &d) in values.iter().enumerate() {
                if !d.is_finite() || d < 0.0 {
                    return Err(ModelError::InvalidDistance { from: row, to: col });
                }
            }
            data.extend(values);
        }
        Ok(Self { data, size })
    }

    /// Computes a Euclidean matrix from `(id, x, y)` points.
    ///
    /// The matrix is sized to the largest id; ids without a point keep zero
    /// distances.
    pub fn from_coordinates(points: &[(usize, f64, f64)]) -> Self {
        let size = points.iter().map(|&(id, _, _)| id + 1).max().unwrap_or(0);
        let mut dm = Self::new(size);
        for (a, &(i, xi, yi)) in points.iter().enumerate() {
            for &(j, xj, yj) in &points[a + 1..] {
                let d = ((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt();
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Returns the distance from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from node `from` to node `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Sets both directions of a symmetric edge.
    pub fn set_symmetric(&mut self, a: usize, b: usize, distance: f64) {
        self.set(a, b, distance);
        self.set(b, a, distance);
    }

    /// Number of nodes in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `id` is a valid row/column.
    pub fn contains(&self, id: usize) -> bool {
        id < self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Length of the path visiting `nodes` in order.
    pub fn path_length(&self, nodes: &[usize]) -> f64 {
        nodes.windows(2).map(|w| self.get(w[0], w[1])).sum()
    }

    /// Returns the nearest node to `from` among the given candidates.
    ///
    /// Ties go to the candidate listed first. Returns `None` if
    /// `candidates` is empty.
    pub fn nearest(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &c in candidates {
            let d = self.get(from, c);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((c, d));
            }
        }
        best.map(|(c, _)| c)
    }

    /// Returns up to `k` candidates closest to `from`, nearest first.
    ///
    /// The sort is stable, so equally distant candidates keep their input
    /// order.
    pub fn k_nearest(&self, from: usize, candidates: &[usize], k: usize) -> Vec<usize> {
        let mut ranked: Vec<(usize, f64)> =
            candidates.iter().map(|&c| (c, self.get(from, c))).collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked.truncate(k);
        ranked.into_iter().map(|(c, _)| c).collect()
    }
}
