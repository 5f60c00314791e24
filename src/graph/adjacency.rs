//! Adjacency-set graph representation

use crate::graph::NodeId;
use std::collections::{HashMap, HashSet};

/// Directed graph stored as a map from each node to its out-neighbors
///
/// Nodes only exist while they have at least one out-edge.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// Out-neighbors per node
    adjacency: HashMap<NodeId, HashSet<NodeId>>,

    /// Returned by `neighbors` for nodes without out-edges
    empty: HashSet<NodeId>,

    /// Number of directed edges
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there's an edge from src to dst
    pub fn contains_edge(&self, src: NodeId, dst: NodeId) -> bool {
        self.adjacency
            .get(&src)
            .map_or(false, |neighbors| neighbors.contains(&dst))
    }

    /// Add an edge from src to dst. Adding an existing edge is a no-op.
    pub fn add_edge(&mut self, src: NodeId, dst: NodeId) {
        if self.adjacency.entry(src).or_default().insert(dst) {
            self.edge_count += 1;
        }
    }

    /// Remove the edge from src to dst. Removing a missing edge is a no-op.
    pub fn remove_edge(&mut self, src: NodeId, dst: NodeId) {
        let Some(neighbors) = self.adjacency.get_mut(&src) else {
            return;
        };

        if neighbors.remove(&dst) {
            self.edge_count -= 1;
        }
        if neighbors.is_empty() {
            self.adjacency.remove(&src);
        }
    }

    /// Get the direct out-neighbors of a node (empty if it has none)
    pub fn neighbors(&self, node: NodeId) -> &HashSet<NodeId> {
        self.adjacency.get(&node).unwrap_or(&self.empty)
    }

    /// Get out-degree of a node
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// Number of nodes with at least one out-edge
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}
