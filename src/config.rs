//! Configuration management for the clique finder

use crate::error::ClusterError;

/// Default minimum cluster size
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 3;

/// Configuration for the online detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Minimum cluster size. Applied to candidate filtering, clique
    /// acceptance and subset cleanup alike.
    pub min_cluster_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_cluster_size: DEFAULT_MIN_CLUSTER_SIZE,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    ///
    /// Every search is triggered by a single verified edge, so the smallest
    /// meaningful cluster is a pair.
    pub fn new(min_cluster_size: usize) -> Result<Self, ClusterError> {
        if min_cluster_size < 2 {
            return Err(ClusterError::invalid_argument(format!(
                "minimum cluster size must be at least 2, got {}",
                min_cluster_size
            )));
        }

        Ok(Self { min_cluster_size })
    }
}
