//! Cluster analysis module

pub mod combinations;
pub mod detection;
pub mod metrics;

use crate::graph::NodeId;
use serde::Serialize;
use std::collections::BTreeSet;

pub use detection::CliqueEngine;

/// A set of mutually connected nodes
///
/// Members are kept sorted and free of duplicates, so two clusters compare
/// equal exactly when they have the same members.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Cluster {
    members: Vec<NodeId>,
}

impl Cluster {
    /// Members in ascending order
    pub fn members(&self) -> &[NodeId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.members.binary_search(&node).is_ok()
    }
}

impl FromIterator<NodeId> for Cluster {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        let mut members: Vec<NodeId> = iter.into_iter().collect();
        members.sort_unstable();
        members.dedup();
        Self { members }
    }
}

impl From<&[NodeId]> for Cluster {
    fn from(members: &[NodeId]) -> Self {
        members.iter().copied().collect()
    }
}

/// Deduplicated collection of discovered clusters, iterated in sorted order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterSet {
    clusters: BTreeSet<Cluster>,
}

impl ClusterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cluster; returns false if an identical cluster was already stored
    pub fn insert(&mut self, cluster: Cluster) -> bool {
        self.clusters.insert(cluster)
    }

    pub fn contains(&self, cluster: &Cluster) -> bool {
        self.clusters.contains(cluster)
    }

    pub fn remove(&mut self, cluster: &Cluster) -> bool {
        self.clusters.remove(cluster)
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cluster> + '_ {
        self.clusters.iter()
    }
}

impl<'a> IntoIterator for &'a ClusterSet {
    type Item = &'a Cluster;
    type IntoIter = std::collections::btree_set::Iter<'a, Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.iter()
    }
}

impl FromIterator<Cluster> for ClusterSet {
    fn from_iter<I: IntoIterator<Item = Cluster>>(iter: I) -> Self {
        Self {
            clusters: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster(ids: &[u32]) -> Cluster {
        ids.iter().map(|&id| NodeId::from(id)).collect()
    }

    #[test]
    fn test_cluster_equality_ignores_order() {
        assert_eq!(cluster(&[3, 1, 2]), cluster(&[1, 2, 3]));
        assert_eq!(cluster(&[2, 2, 1]).len(), 2);
    }

    #[test]
    fn test_cluster_set_deduplicates() {
        let mut set = ClusterSet::new();

        assert!(set.insert(cluster(&[1, 2, 3])));
        assert!(!set.insert(cluster(&[3, 2, 1])));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&cluster(&[2, 1, 3])));
    }
}
