//! Node identifier registry

use crate::error::ClusterError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Stable identifier for a logical entity in the interaction graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Index of this node in registry order
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps external keys (e.g. email addresses) to node identifiers
#[derive(Debug, Default)]
pub struct NodeRegistry {
    /// Mapping from external keys to node identifiers
    key_to_id: HashMap<String, NodeId>,

    /// External keys, indexed by node identifier
    node_keys: Vec<String>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a node ID for the given external key
    ///
    /// Fails once every `NodeId` has been handed out.
    pub fn get_or_create_node(&mut self, key: &str) -> Result<NodeId, ClusterError> {
        if let Some(&id) = self.key_to_id.get(key) {
            return Ok(id);
        }

        let id = next_id(self.node_keys.len())?;
        self.key_to_id.insert(key.to_string(), id);
        self.node_keys.push(key.to_string());

        Ok(id)
    }

    /// External key for a node, if the node came from this registry
    pub fn key(&self, id: NodeId) -> Option<&str> {
        self.node_keys.get(id.index()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.node_keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_keys.is_empty()
    }
}

/// Identifier for the node registered after `assigned` others
fn next_id(assigned: usize) -> Result<NodeId, ClusterError> {
    u32::try_from(assigned)
        .map(NodeId)
        .map_err(|_| ClusterError::RegistryFull(assigned))
}
