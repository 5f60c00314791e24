//! Visualization generation module

use crate::cluster::metrics::ClusterSummary;
use crate::graph::{Graph, NodeRegistry};
use crate::storage::node_label;
use anyhow::Result;
use petgraph::dot::{Config, Dot};
use petgraph::graph::UnGraph;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Generate Graphviz files for every cluster
pub fn generate_visualizations(
    summaries: &[ClusterSummary],
    graph: &Graph,
    registry: &NodeRegistry,
    output_dir: &Path,
) -> Result<()> {
    log::info!("Generating visualizations for {} clusters", summaries.len());

    let viz_dir = output_dir.join("visualizations");
    fs::create_dir_all(&viz_dir)?;

    for summary in summaries {
        let file_path = viz_dir.join(format!("cluster_{}.dot", summary.id));
        let mut file = File::create(file_path)?;

        let cluster_graph = build_cluster_graph(summary, graph, registry);
        write!(
            file,
            "{}",
            Dot::with_config(&cluster_graph, &[Config::EdgeNoLabel])
        )?;
    }

    log::info!("Visualizations generated successfully");

    Ok(())
}

/// Subgraph of verified edges between the members of a cluster
pub fn build_cluster_graph(
    summary: &ClusterSummary,
    graph: &Graph,
    registry: &NodeRegistry,
) -> UnGraph<String, &'static str> {
    let mut cluster_graph =
        UnGraph::with_capacity(summary.size, summary.size * summary.size.saturating_sub(1) / 2);

    let indices: Vec<_> = summary
        .members
        .iter()
        .map(|&node| cluster_graph.add_node(node_label(registry, node)))
        .collect();

    for (i, &src) in summary.members.iter().enumerate() {
        for (j, &dst) in summary.members.iter().enumerate().skip(i + 1) {
            if graph.contains_edge(src, dst) {
                cluster_graph.add_edge(indices[i], indices[j], "");
            }
        }
    }

    cluster_graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::metrics::summarize_cluster;
    use crate::cluster::Cluster;
    use crate::graph::NodeId;

    #[test]
    fn test_cluster_graph_contains_all_clique_edges() {
        let mut registry = NodeRegistry::new();
        let ids: Vec<NodeId> = ["amy", "bob", "cat", "dan"]
            .iter()
            .map(|key| registry.get_or_create_node(key).unwrap())
            .collect();
        let mut graph = Graph::new();
        for &a in &ids {
            for &b in &ids {
                if a != b {
                    graph.add_edge(a, b);
                }
            }
        }
        let cluster: Cluster = ids.iter().copied().collect();
        let summary = summarize_cluster(0, &cluster, &graph);

        let cluster_graph = build_cluster_graph(&summary, &graph, &registry);

        assert_eq!(cluster_graph.node_count(), 4);
        assert_eq!(cluster_graph.edge_count(), 6);
        let dot = format!("{}", Dot::with_config(&cluster_graph, &[Config::EdgeNoLabel]));
        assert!(dot.starts_with("graph {"));
        assert!(dot.contains("amy"));
    }
}
