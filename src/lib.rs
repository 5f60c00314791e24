//! Core library functions for the interaction clique finder

pub mod cluster;
pub mod config;
pub mod data;
pub mod detector;
pub mod error;
pub mod graph;
pub mod storage;
pub mod viz;

pub use anyhow::{anyhow, Result};
pub use cluster::{Cluster, ClusterSet};
pub use config::Config;
pub use detector::OnlineDetector;
pub use error::ClusterError;
pub use graph::{NodeId, NodeRegistry};
