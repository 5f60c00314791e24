//! Cluster formatting and results persistence module

use crate::cluster::metrics::ClusterSummary;
use crate::cluster::ClusterSet;
use crate::detector::DetectorStats;
use crate::graph::{Graph, NodeId, NodeRegistry};
use anyhow::Result;
use itertools::Itertools;
use serde_json::{json, to_string_pretty};
use statrs::statistics;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Resolve a node to its external key, falling back to the raw id
pub fn node_label(registry: &NodeRegistry, node: NodeId) -> String {
    registry
        .key(node)
        .map_or_else(|| node.to_string(), str::to_string)
}

/// Render clusters as sorted, comma-separated lists of external keys
///
/// Members are sorted within each cluster and the rendered clusters are
/// sorted among themselves, so output is independent of discovery order.
pub fn format_clusters(clusters: &ClusterSet, registry: &NodeRegistry) -> Vec<String> {
    clusters
        .iter()
        .map(|cluster| {
            cluster
                .members()
                .iter()
                .map(|&node| node_label(registry, node))
                .sorted()
                .join(", ")
        })
        .sorted()
        .collect()
}

/// Save analysis results to the specified directory
pub fn save_results(
    summaries: &[ClusterSummary],
    graph: &Graph,
    stats: &DetectorStats,
    registry: &NodeRegistry,
    output_dir: &Path,
) -> Result<()> {
    log::info!("Saving {} clusters to {}", summaries.len(), output_dir.display());

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(summaries, graph, stats, registry, output_dir)?;
    save_clusters(summaries, registry, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save summary information
fn save_summary(
    summaries: &[ClusterSummary],
    graph: &Graph,
    stats: &DetectorStats,
    registry: &NodeRegistry,
    output_dir: &Path,
) -> Result<()> {
    log::info!("Saving summary information");

    let path = output_dir.join("summary.json");
    let mut file = File::create(path)?;

    let sizes: Vec<f64> = summaries.iter().map(|s| s.size as f64).collect();
    let (mean_size, size_std_dev) = match sizes.len() {
        0 => (0.0, 0.0),
        1 => (sizes[0], 0.0),
        _ => (
            statistics::Statistics::mean(sizes.iter()),
            statistics::Statistics::std_dev(sizes.iter()),
        ),
    };

    let summary = json!({
        "graph_stats": {
            "node_count": registry.len(),
            "verified_node_count": graph.node_count(),
            "verified_edge_count": graph.edge_count() / 2,
        },
        "stream_stats": stats,
        "cluster_stats": {
            "cluster_count": summaries.len(),
            "largest_cluster_size": summaries.iter().map(|s| s.size).max().unwrap_or(0),
            "smallest_cluster_size": summaries.iter().map(|s| s.size).min().unwrap_or(0),
            "mean_cluster_size": mean_size,
            "cluster_size_std_dev": size_std_dev,
        }
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save individual cluster information
fn save_clusters(
    summaries: &[ClusterSummary],
    registry: &NodeRegistry,
    output_dir: &Path,
) -> Result<()> {
    log::info!("Saving individual cluster information");

    let clusters_dir = output_dir.join("clusters");
    fs::create_dir_all(&clusters_dir)?;

    let labels = |nodes: &[NodeId]| -> Vec<String> {
        nodes.iter().map(|&node| node_label(registry, node)).collect()
    };

    for summary in summaries {
        let path = clusters_dir.join(format!("cluster_{}.json", summary.id));
        let mut file = File::create(path)?;

        let cluster_json = json!({
            "id": summary.id,
            "size": summary.size,
            "density": summary.density,
            "central_nodes": labels(&summary.central_nodes),
            "members": labels(&summary.members),
        });

        file.write_all(to_string_pretty(&cluster_json)?.as_bytes())?;
    }

    let all_clusters_path = output_dir.join("all_clusters.json");
    let mut all_clusters_file = File::create(all_clusters_path)?;

    let clusters_json = json!({
        "clusters": summaries.iter().map(|s| {
            json!({
                "id": s.id,
                "size": s.size,
                "members": labels(&s.members),
            })
        }).collect::<Vec<_>>()
    });

    all_clusters_file.write_all(to_string_pretty(&clusters_json)?.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::metrics::summarize_clusters;
    use crate::cluster::Cluster;

    fn registry_with(keys: &[&str]) -> NodeRegistry {
        let mut registry = NodeRegistry::new();
        for key in keys {
            registry.get_or_create_node(key).unwrap();
        }
        registry
    }

    fn cluster(ids: &[u32]) -> Cluster {
        ids.iter().map(|&id| NodeId::from(id)).collect()
    }

    #[test]
    fn test_format_sorts_members_and_clusters() {
        let registry = registry_with(&["zed", "amy", "bob", "cat", "dan"]);
        let clusters: ClusterSet = vec![cluster(&[0, 1, 2]), cluster(&[1, 3, 4])]
            .into_iter()
            .collect();

        let lines = format_clusters(&clusters, &registry);

        assert_eq!(lines, vec!["amy, bob, zed", "amy, cat, dan"]);
    }

    #[test]
    fn test_format_falls_back_to_node_id() {
        let registry = registry_with(&["amy"]);
        let clusters: ClusterSet = std::iter::once(cluster(&[0, 7, 9])).collect();

        assert_eq!(format_clusters(&clusters, &registry), vec!["7, 9, amy"]);
    }

    #[test]
    fn test_save_results_writes_files() {
        let registry = registry_with(&["amy", "bob", "cat"]);
        let mut graph = Graph::new();
        for (a, b) in [(0, 1), (0, 2), (1, 2)] {
            graph.add_edge(NodeId::from(a), NodeId::from(b));
            graph.add_edge(NodeId::from(b), NodeId::from(a));
        }
        let clusters: ClusterSet = std::iter::once(cluster(&[0, 1, 2])).collect();
        let summaries = summarize_clusters(&clusters, &graph);

        let output_dir = std::env::temp_dir().join(format!(
            "interaction-clique-finder-storage-{}",
            std::process::id()
        ));
        save_results(&summaries, &graph, &DetectorStats::default(), &registry, &output_dir)
            .unwrap();

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output_dir.join("summary.json")).unwrap())
                .unwrap();
        assert_eq!(summary["cluster_stats"]["cluster_count"], 1);
        assert_eq!(summary["graph_stats"]["verified_edge_count"], 3);

        let cluster: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(output_dir.join("clusters").join("cluster_0.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(cluster["members"], json!(["amy", "bob", "cat"]));

        fs::remove_dir_all(&output_dir).unwrap();
    }
}
