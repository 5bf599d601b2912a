//! GRASP configuration.

use serde::{Deserialize, Serialize};

use crate::error::GraspError;

/// Parameters of a GRASP run.
///
/// # Examples
///
/// ```
/// use cvrp_heuristics::grasp::GraspConfig;
///
/// let config = GraspConfig::default()
///     .with_max_iterations(50)
///     .with_rcl_size(4)
///     .with_seed(7);
/// assert_eq!(config.max_iterations, 50);
/// assert_eq!(config.rcl_size, 4);
/// assert_eq!(config.seed, Some(7));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraspConfig {
    /// Number of construct-and-improve iterations.
    pub max_iterations: usize,
    /// Size of the restricted candidate list (k nearest customers).
    pub rcl_size: usize,
    /// Seed for a reproducible run; `None` draws from OS entropy per run.
    pub seed: Option<u64>,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            rcl_size: 3,
            seed: None,
        }
    }
}

impl GraspConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_rcl_size(mut self, k: usize) -> Self {
        self.rcl_size = k;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the configuration can drive a run.
    pub fn validate(&self) -> Result<(), GraspError> {
        if self.rcl_size == 0 {
            return Err(GraspError::EmptyCandidateList);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GraspConfig::default();
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.rcl_size, 3);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_zero_rcl_rejected() {
        let config = GraspConfig::default().with_rcl_size(0);
        assert_eq!(config.validate(), Err(GraspError::EmptyCandidateList));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GraspConfig =
            serde_json::from_str(r#"{"rcl_size": 5}"#).expect("valid json");
        assert_eq!(config.rcl_size, 5);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.seed, None);
    }
}
