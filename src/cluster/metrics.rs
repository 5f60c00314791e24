//! Cluster statistics and metrics

use crate::cluster::{Cluster, ClusterSet};
use crate::graph::{Graph, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of central nodes reported per cluster
const CENTRAL_NODE_COUNT: usize = 5;

/// Per-cluster metrics over the verified graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Position of the cluster in the summarized set
    pub id: u32,

    /// Members of this cluster
    pub members: Vec<NodeId>,

    /// Size of the cluster
    pub size: usize,

    /// Density: actual edges / potential edges
    pub density: f32,

    /// Members with the highest verified degree, highest first
    pub central_nodes: Vec<NodeId>,
}

/// Summarize every cluster in the set, in set order
pub fn summarize_clusters(clusters: &ClusterSet, graph: &Graph) -> Vec<ClusterSummary> {
    clusters
        .iter()
        .enumerate()
        .map(|(id, cluster)| summarize_cluster(id as u32, cluster, graph))
        .collect()
}

/// Calculate metrics for a single cluster
pub fn summarize_cluster(id: u32, cluster: &Cluster, graph: &Graph) -> ClusterSummary {
    ClusterSummary {
        id,
        members: cluster.members().to_vec(),
        size: cluster.len(),
        density: calculate_density(graph, cluster.members()),
        central_nodes: identify_central_nodes(graph, cluster.members()),
    }
}

/// Calculate density (actual edges / potential edges)
///
/// Every clique of the verified graph has density 1.
pub fn calculate_density(graph: &Graph, members: &[NodeId]) -> f32 {
    let n = members.len();
    if n <= 1 {
        return 1.0; // By convention, singleton clusters have density 1
    }

    // Potential edges = n * (n - 1), the verified graph stores both directions
    let potential_edges = n * (n - 1);

    let member_set: HashSet<NodeId> = members.iter().copied().collect();
    let actual_edges: usize = members
        .iter()
        .map(|&node| {
            graph
                .neighbors(node)
                .iter()
                .filter(|neighbor| member_set.contains(neighbor))
                .count()
        })
        .sum();

    actual_edges as f32 / potential_edges as f32
}

/// Members ranked by their degree in the whole verified graph
///
/// Inside a clique every member has the same internal degree, so the overall
/// degree tells which members also reach furthest outside the cluster.
pub fn identify_central_nodes(graph: &Graph, members: &[NodeId]) -> Vec<NodeId> {
    let mut degrees: Vec<(NodeId, usize)> = members
        .iter()
        .map(|&node| (node, graph.out_degree(node)))
        .collect();

    // Highest degree first, ties by node
    degrees.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    degrees
        .into_iter()
        .take(CENTRAL_NODE_COUNT)
        .map(|(node, _)| node)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: u32) -> NodeId {
        NodeId::from(id)
    }

    fn mutual_graph(edges: &[(u32, u32)]) -> Graph {
        let mut graph = Graph::new();
        for &(a, b) in edges {
            graph.add_edge(n(a), n(b));
            graph.add_edge(n(b), n(a));
        }
        graph
    }

    #[test]
    fn test_clique_density_is_one() {
        let graph = mutual_graph(&[(1, 2), (1, 3), (2, 3), (3, 4)]);
        assert_eq!(calculate_density(&graph, &[n(1), n(2), n(3)]), 1.0);
    }

    #[test]
    fn test_partial_density() {
        let graph = mutual_graph(&[(1, 2), (2, 3)]);
        let density = calculate_density(&graph, &[n(1), n(2), n(3)]);
        assert!((density - 4.0 / 6.0).abs() < 1e-6);
    }

    #[test]
    fn test_central_nodes_ranked_by_degree() {
        let graph = mutual_graph(&[(1, 2), (1, 3), (2, 3), (3, 4), (3, 5), (2, 6)]);

        let central = identify_central_nodes(&graph, &[n(1), n(2), n(3)]);

        assert_eq!(central, vec![n(3), n(2), n(1)]);
    }

    #[test]
    fn test_summarize_clusters() {
        let graph = mutual_graph(&[(1, 2), (1, 3), (2, 3)]);
        let clusters: ClusterSet = [[1, 2, 3]]
            .iter()
            .map(|ids| ids.iter().map(|&id| n(id)).collect::<Cluster>())
            .collect();

        let summaries = summarize_clusters(&clusters, &graph);

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, 0);
        assert_eq!(summaries[0].size, 3);
        assert_eq!(summaries[0].members, vec![n(1), n(2), n(3)]);
        assert_eq!(summaries[0].density, 1.0);
    }
}
