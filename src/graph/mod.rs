//! Graph representation and edge verification module

pub mod adjacency;
pub mod registry;
pub mod verifier;

pub use adjacency::Graph;
pub use registry::{NodeId, NodeRegistry};
pub use verifier::{EdgeVerifier, Observation, PairState};
