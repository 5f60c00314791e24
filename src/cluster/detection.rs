//! Incremental maximal clique detection
//!
//! Local search follows the Bron-Kerbosch algorithm without pivoting, as
//! described in Bron, C.; Kerbosch, J. (1973). "Algorithm 457: finding all
//! cliques of an undirected graph". Communications of the ACM. 16 (9): 575-577.

use crate::cluster::combinations::all_subsets_in_range;
use crate::cluster::{Cluster, ClusterSet};
use crate::error::ClusterError;
use crate::graph::{Graph, NodeId};
use serde::Serialize;

/// Counters describing the work done by a clique engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    /// Local searches that were run
    pub searches: usize,

    /// Verified edges whose neighborhood was too small to search
    pub skipped_searches: usize,

    /// Distinct clusters added by local searches
    pub clusters_found: usize,

    /// Clusters removed as subsets of larger clusters
    pub clusters_removed: usize,
}

/// Maintains the set of maximal clusters as verified edges arrive
#[derive(Debug)]
pub struct CliqueEngine {
    min_cluster_size: usize,
    clusters: ClusterSet,
    stats: EngineStats,
}

impl CliqueEngine {
    pub fn new(min_cluster_size: usize) -> Self {
        Self {
            min_cluster_size,
            clusters: ClusterSet::new(),
            stats: EngineStats::default(),
        }
    }

    /// Search for new clusters around a freshly verified edge (u, v)
    ///
    /// Returns the number of clusters added.
    pub fn on_verified_edge(&mut self, graph: &Graph, u: NodeId, v: NodeId) -> usize {
        match self.candidate_seed(graph, u, v) {
            Some(seed) => self.update_clusters_local(graph, seed),
            None => {
                self.stats.skipped_searches += 1;
                0
            }
        }
    }

    /// Nodes that may form a new cluster with the edge (u, v)
    ///
    /// A new clique containing both endpoints can only use their common
    /// neighbors. Returns `None` when no clique of the minimum size can
    /// include the edge yet.
    pub fn candidate_seed(&self, graph: &Graph, u: NodeId, v: NodeId) -> Option<Vec<NodeId>> {
        let u_neighbors = graph.neighbors(u);
        let v_neighbors = graph.neighbors(v);
        let min_degree = self.min_cluster_size.saturating_sub(1);

        if u_neighbors.len() < min_degree || v_neighbors.len() < min_degree {
            return None;
        }

        let mut seed: Vec<NodeId> = u_neighbors.intersection(v_neighbors).copied().collect();
        seed.push(u);
        seed.push(v);
        seed.sort_unstable();
        seed.dedup();

        if seed.len() < self.min_cluster_size {
            return None;
        }

        Some(seed)
    }

    /// Add the maximal cliques within `seed` to the cluster set
    ///
    /// Only the subgraph induced by `seed` is examined. Returns the number of
    /// clusters added.
    pub fn update_clusters_local(
        &mut self,
        graph: &Graph,
        seed: impl IntoIterator<Item = NodeId>,
    ) -> usize {
        // Sorted so the enumeration path is reproducible
        let mut candidates: Vec<NodeId> = seed.into_iter().collect();
        candidates.sort_unstable();
        candidates.dedup();

        let mut search = LocalSearch {
            graph,
            min_cluster_size: self.min_cluster_size,
            clusters: &mut self.clusters,
            added: 0,
        };
        let mut potential = Vec::with_capacity(candidates.len());
        search.expand(&mut potential, &candidates, Vec::new());

        let added = search.added;
        self.stats.searches += 1;
        self.stats.clusters_found += added;
        added
    }

    /// Remove clusters that are proper subsets of other stored clusters
    ///
    /// Local searches only see a bounded neighborhood, so a cluster found
    /// early can later be subsumed by a larger one. Every candidate subset of
    /// every cluster is generated and looked up; removal happens only after
    /// the full scan. Returns the number of clusters removed.
    pub fn clean_subset_clusters(&mut self) -> Result<usize, ClusterError> {
        let mut to_remove = Vec::new();

        for cluster in &self.clusters {
            if cluster.len() <= self.min_cluster_size {
                continue;
            }

            let subsets =
                all_subsets_in_range(self.min_cluster_size, cluster.len() - 1, cluster.members())?;
            for subset in subsets {
                let subset = Cluster::from(subset.as_slice());
                if self.clusters.contains(&subset) {
                    to_remove.push(subset);
                }
            }
        }

        // A subset shared by several supersets is marked more than once
        let mut removed = 0;
        for cluster in &to_remove {
            if self.clusters.remove(cluster) {
                removed += 1;
            }
        }
        self.stats.clusters_removed += removed;

        log::info!(
            "Removed {} subset clusters, {} clusters remain",
            removed,
            self.clusters.len()
        );

        Ok(removed)
    }

    /// Clusters found so far; may contain subsets of larger clusters until
    /// `clean_subset_clusters` has run
    pub fn clusters(&self) -> &ClusterSet {
        &self.clusters
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }
}

/// State shared by the frames of one Bron-Kerbosch search
struct LocalSearch<'a> {
    graph: &'a Graph,
    min_cluster_size: usize,
    clusters: &'a mut ClusterSet,
    added: usize,
}

impl LocalSearch<'_> {
    /// One Bron-Kerbosch frame
    ///
    /// `potential` is shared by all frames and restored before returning.
    /// Each iteration takes the next candidate, so the candidates still
    /// eligible at step i are `candidates[i + 1..]`.
    fn expand(
        &mut self,
        potential: &mut Vec<NodeId>,
        candidates: &[NodeId],
        mut already_found: Vec<NodeId>,
    ) {
        if self.end_reached(candidates, &already_found) {
            return;
        }

        let graph = self.graph;
        for (i, &candidate) in candidates.iter().enumerate() {
            potential.push(candidate);

            let new_candidates: Vec<NodeId> = candidates[i + 1..]
                .iter()
                .copied()
                .filter(|&node| graph.contains_edge(candidate, node))
                .collect();
            let new_already_found: Vec<NodeId> = already_found
                .iter()
                .copied()
                .filter(|&node| graph.contains_edge(candidate, node))
                .collect();

            if new_candidates.is_empty() && new_already_found.is_empty() {
                if potential.len() >= self.min_cluster_size {
                    self.record(potential);
                }
            } else {
                self.expand(potential, &new_candidates, new_already_found);
            }

            potential.pop();
            already_found.push(candidate);
        }
    }

    /// True if some explored node is connected to every remaining candidate.
    /// Any clique reachable from here extends with that node, so it was
    /// already found from that node's branch.
    fn end_reached(&self, candidates: &[NodeId], already_found: &[NodeId]) -> bool {
        already_found.iter().any(|&found| {
            candidates
                .iter()
                .all(|&candidate| self.graph.contains_edge(found, candidate))
        })
    }

    fn record(&mut self, potential: &[NodeId]) {
        let cluster = Cluster::from(potential);
        log::debug!("Found cluster {:?}", cluster.members());
        if self.clusters.insert(cluster) {
            self.added += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(id: u32) -> NodeId {
        NodeId::from(id)
    }

    fn cluster(ids: &[u32]) -> Cluster {
        ids.iter().map(|&id| n(id)).collect()
    }

    fn mutual_graph(edges: &[(u32, u32)]) -> Graph {
        let mut graph = Graph::new();
        for &(a, b) in edges {
            graph.add_edge(n(a), n(b));
            graph.add_edge(n(b), n(a));
        }
        graph
    }

    fn engine_with(clusters: &[&[u32]]) -> CliqueEngine {
        let mut engine = CliqueEngine::new(3);
        engine.clusters = clusters.iter().map(|ids| cluster(ids)).collect();
        engine
    }

    #[test]
    fn test_local_search_finds_triangle() {
        let graph = mutual_graph(&[(1, 2), (1, 3), (2, 3)]);
        let mut engine = CliqueEngine::new(3);

        let added = engine.update_clusters_local(&graph, [n(3), n(1), n(2)]);

        assert_eq!(added, 1);
        assert!(engine.clusters().contains(&cluster(&[1, 2, 3])));
    }

    #[test]
    fn test_local_search_finds_all_maximal_cliques() {
        // Two 4-cliques sharing the edge 3-4, plus a triangle hanging off 1
        let graph = mutual_graph(&[
            (1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4),
            (3, 5), (3, 6), (4, 5), (4, 6), (5, 6),
            (1, 7), (2, 7),
        ]);
        let mut engine = CliqueEngine::new(3);

        engine.update_clusters_local(&graph, (1..=7).map(n));

        let found: Vec<Cluster> = engine.clusters().iter().cloned().collect();
        assert_eq!(
            found,
            vec![cluster(&[1, 2, 3, 4]), cluster(&[1, 2, 7]), cluster(&[3, 4, 5, 6])]
        );
    }

    #[test]
    fn test_local_search_respects_minimum_size() {
        let graph = mutual_graph(&[(1, 2), (2, 3)]);
        let mut engine = CliqueEngine::new(3);

        assert_eq!(engine.update_clusters_local(&graph, [n(1), n(2), n(3)]), 0);
        assert!(engine.clusters().is_empty());
        assert_eq!(engine.stats().searches, 1);
    }

    #[test]
    fn test_local_search_is_restricted_to_seed() {
        let graph = mutual_graph(&[(1, 2), (1, 3), (2, 3), (1, 4), (2, 4), (3, 4)]);
        let mut engine = CliqueEngine::new(3);

        engine.update_clusters_local(&graph, [n(1), n(2), n(3)]);

        assert_eq!(engine.clusters().len(), 1);
        assert!(engine.clusters().contains(&cluster(&[1, 2, 3])));
    }

    #[test]
    fn test_candidate_seed_is_common_neighborhood() {
        let graph = mutual_graph(&[(1, 2), (1, 3), (2, 3), (1, 4), (2, 5)]);
        let engine = CliqueEngine::new(3);

        assert_eq!(engine.candidate_seed(&graph, n(1), n(2)), Some(vec![n(1), n(2), n(3)]));
    }

    #[test]
    fn test_candidate_seed_skips_low_degree_endpoints() {
        let graph = mutual_graph(&[(1, 2), (1, 3)]);
        let engine = CliqueEngine::new(3);

        assert_eq!(engine.candidate_seed(&graph, n(1), n(2)), None);
    }

    #[test]
    fn test_candidate_seed_skips_small_intersection() {
        // Both endpoints have degree 2 but no common neighbor
        let graph = mutual_graph(&[(1, 2), (1, 3), (2, 4)]);
        let mut engine = CliqueEngine::new(3);

        assert_eq!(engine.candidate_seed(&graph, n(1), n(2)), None);
        assert_eq!(engine.on_verified_edge(&graph, n(1), n(2)), 0);
        assert_eq!(engine.stats().skipped_searches, 1);
        assert_eq!(engine.stats().searches, 0);
    }

    #[test]
    fn test_clean_removes_subsets() {
        let mut engine = engine_with(&[&[1, 2, 3], &[1, 2, 3, 4]]);

        assert_eq!(engine.clean_subset_clusters().unwrap(), 1);

        let remaining: Vec<Cluster> = engine.clusters().iter().cloned().collect();
        assert_eq!(remaining, vec![cluster(&[1, 2, 3, 4])]);
    }

    #[test]
    fn test_clean_keeps_incomparable_clusters() {
        let mut engine = engine_with(&[&[1, 2, 3], &[2, 3, 4, 5]]);

        assert_eq!(engine.clean_subset_clusters().unwrap(), 0);
        assert_eq!(engine.clusters().len(), 2);
    }

    #[test]
    fn test_clean_removes_subsets_of_several_supersets() {
        let mut engine = engine_with(&[
            &[1, 2, 3],
            &[1, 2, 4],
            &[1, 2, 3, 4],
            &[1, 2, 3, 4, 5],
            &[3, 4, 5],
            &[6, 7, 8],
        ]);

        assert_eq!(engine.clean_subset_clusters().unwrap(), 4);

        let remaining: Vec<Cluster> = engine.clusters().iter().cloned().collect();
        assert_eq!(remaining, vec![cluster(&[1, 2, 3, 4, 5]), cluster(&[6, 7, 8])]);
        assert_eq!(engine.stats().clusters_removed, 4);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let mut engine = engine_with(&[&[1, 2, 3], &[1, 2, 3, 4], &[4, 5, 6]]);

        engine.clean_subset_clusters().unwrap();
        let once = engine.clusters().clone();
        assert_eq!(engine.clean_subset_clusters().unwrap(), 0);

        assert_eq!(engine.clusters(), &once);
    }
}
