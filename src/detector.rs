//! Online cluster detection over a stream of directed interactions

use crate::cluster::detection::EngineStats;
use crate::cluster::{CliqueEngine, ClusterSet};
use crate::config::Config;
use crate::error::ClusterError;
use crate::graph::{EdgeVerifier, Graph, NodeId, Observation, PairState};
use serde::Serialize;

/// Counters describing a detection run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DetectorStats {
    /// Events passed to `process`
    pub events: usize,

    /// Events ignored as self-interactions or repeats of verified pairs
    pub ignored_events: usize,

    /// Pairs promoted to mutual edges
    pub verified_pairs: usize,

    /// Clusters currently stored
    pub clusters: usize,

    /// Clique engine counters
    pub engine: EngineStats,
}

/// Discovers maximal clusters of mutually interacting nodes, one event at a
/// time
///
/// Events must be fed in stream order. Call `finalize` once after the last
/// event to drop clusters subsumed by larger ones.
#[derive(Debug)]
pub struct OnlineDetector {
    verifier: EdgeVerifier,
    engine: CliqueEngine,
    events: usize,
    ignored_events: usize,
    verified_pairs: usize,
}

impl Default for OnlineDetector {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl OnlineDetector {
    pub fn new(config: Config) -> Self {
        Self {
            verifier: EdgeVerifier::new(),
            engine: CliqueEngine::new(config.min_cluster_size),
            events: 0,
            ignored_events: 0,
            verified_pairs: 0,
        }
    }

    /// Record the interaction `from -> to` and search for clusters it may
    /// have completed
    pub fn process(&mut self, from: NodeId, to: NodeId) {
        self.events += 1;

        match self.verifier.observe(from, to) {
            Observation::Ignored => self.ignored_events += 1,
            Observation::Pending => {}
            Observation::Verified => {
                self.verified_pairs += 1;
                let added = self.engine.on_verified_edge(self.verifier.verified(), from, to);
                if added > 0 {
                    log::debug!(
                        "Edge {} <-> {} completed {} new cluster(s)",
                        from,
                        to,
                        added
                    );
                }
            }
        }
    }

    /// Remove clusters that are subsets of larger clusters
    ///
    /// Meant to be called once at the end of the stream. Returns the number
    /// of clusters removed.
    pub fn finalize(&mut self) -> Result<usize, ClusterError> {
        log::info!(
            "Finalizing after {} events: {} verified pairs, {} candidate clusters",
            self.events,
            self.verified_pairs,
            self.engine.clusters().len()
        );

        self.engine.clean_subset_clusters()
    }

    /// Clusters discovered so far
    pub fn clusters(&self) -> &ClusterSet {
        self.engine.clusters()
    }

    /// The graph of mutual interactions
    pub fn verified_graph(&self) -> &Graph {
        self.verifier.verified()
    }

    pub fn pair_state(&self, a: NodeId, b: NodeId) -> PairState {
        self.verifier.pair_state(a, b)
    }

    pub fn stats(&self) -> DetectorStats {
        DetectorStats {
            events: self.events,
            ignored_events: self.ignored_events,
            verified_pairs: self.verified_pairs,
            clusters: self.engine.clusters().len(),
            engine: self.engine.stats(),
        }
    }
}
