//! Error types for the clique detection core

use thiserror::Error;

/// Errors raised by the core.
///
/// These are never retried or corrected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClusterError {
    /// An argument was outside the domain of the operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Every node identifier is already assigned.
    #[error("node registry is full after {0} keys")]
    RegistryFull(usize),
}

impl ClusterError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
