//! Promotion of directed observations into mutual edges

use crate::graph::{Graph, NodeId};

/// Verification state of an observed pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairState {
    /// Neither direction has been observed
    Unseen,
    /// One direction has been observed, waiting for the reverse
    PendingVerification,
    /// Both directions have been observed
    Verified,
}

/// Outcome of observing a single directed interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Self-interaction or an already verified pair; nothing changed
    Ignored,
    /// First direction recorded in the unverified graph
    Pending,
    /// The reverse direction was pending; the pair is now mutual
    Verified,
}

impl Observation {
    /// Whether the event may have created a new maximal clique
    pub fn changed(self) -> bool {
        matches!(self, Observation::Verified)
    }
}

/// Tracks directed observations until they are confirmed in both directions
#[derive(Debug, Default)]
pub struct EdgeVerifier {
    /// Directed observations still waiting for their reverse
    unverified: Graph,

    /// Mutual edges, always stored in both directions
    verified: Graph,
}

impl EdgeVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a directed interaction from `from` to `to`
    pub fn observe(&mut self, from: NodeId, to: NodeId) -> Observation {
        // Self-loops can never be part of a clique
        if from == to {
            return Observation::Ignored;
        }

        if self.verified.contains_edge(from, to) {
            return Observation::Ignored;
        }

        if self.unverified.contains_edge(to, from) {
            self.verified.add_edge(from, to);
            self.verified.add_edge(to, from);
            self.unverified.remove_edge(to, from);
            return Observation::Verified;
        }

        self.unverified.add_edge(from, to);
        Observation::Pending
    }

    /// Current verification state of the pair {a, b}
    pub fn pair_state(&self, a: NodeId, b: NodeId) -> PairState {
        if self.verified.contains_edge(a, b) {
            PairState::Verified
        } else if self.unverified.contains_edge(a, b) || self.unverified.contains_edge(b, a) {
            PairState::PendingVerification
        } else {
            PairState::Unseen
        }
    }

    /// The graph of mutual interactions
    pub fn verified(&self) -> &Graph {
        &self.verified
    }

    /// The graph of one-directional observations
    pub fn unverified(&self) -> &Graph {
        &self.unverified
    }
}
