//! Shell-account chain detection.
//!
//! Layering typology: funds hop from an origin through a run of barely-used
//! pass-through accounts before landing at a destination. Each intermediary
//! shows the volume profile of a shell: two or three lifetime transactions,
//! at least one in and one out.

use crate::graph::AdjacencyIndex;
use crate::types::{FraudRing, Node, RingType, TransactionGraph};
use fraudgraph_core::{detector::DetectorMetadata, detector::ForensicKernel, domain::Domain};
use std::collections::HashSet;

/// Configuration for shell chain detection.
#[derive(Debug, Clone)]
pub struct ShellChainConfig {
    /// Minimum lifetime transaction count of a shell candidate (inclusive).
    pub min_activity: u32,
    /// Maximum lifetime transaction count of a shell candidate (inclusive).
    pub max_activity: u32,
    /// Minimum accumulated path length, in nodes, before a terminal closes
    /// a chain (start plus at least two shell hops).
    pub min_chain_nodes: usize,
    /// Fixed risk score assigned to shell rings.
    pub risk_score: f64,
}

impl Default for ShellChainConfig {
    fn default() -> Self {
        Self {
            min_activity: 2,
            max_activity: 3,
            min_chain_nodes: 3,
            risk_score: 80.0,
        }
    }
}

/// Layered shell-chain kernel.
///
/// DFS along outgoing neighbors, extending the path only through shell
/// candidates not already on it; reaching a non-shell account terminates the
/// chain. Traversal starts from non-shell nodes only, so shell-internal
/// sub-segments are never reported as independent top-level chains.
#[derive(Debug, Clone)]
pub struct ShellChainDetector {
    metadata: DetectorMetadata,
    config: ShellChainConfig,
}

impl Default for ShellChainDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellChainDetector {
    /// Create a detector with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ShellChainConfig::default())
    }

    /// Create a detector with explicit thresholds.
    #[must_use]
    pub fn with_config(config: ShellChainConfig) -> Self {
        Self {
            metadata: DetectorMetadata::new("forensics/shell-chains", Domain::Compliance)
                .with_description("Multi-hop layering through low-activity pass-through accounts"),
            config,
        }
    }

    /// Whether an account fits the pure pass-through volume profile.
    #[must_use]
    pub fn is_shell_candidate(&self, node: &Node) -> bool {
        let total = node.total_degree();
        total >= self.config.min_activity
            && total <= self.config.max_activity
            && node.in_degree >= 1
            && node.out_degree >= 1
    }

    /// Detect shell chains across the graph.
    ///
    /// Chains are deduplicated by their exact member-sequence key; a
    /// sub-chain of a longer chain is a distinct record and both may appear.
    #[must_use]
    pub fn detect(&self, graph: &TransactionGraph, index: &AdjacencyIndex) -> Vec<FraudRing> {
        let mut rings = Vec::new();
        let mut seen_chains: HashSet<String> = HashSet::new();

        for start in &graph.nodes {
            if self.is_shell_candidate(start) {
                continue;
            }
            let mut path = vec![start.id.clone()];
            self.extend_chain(graph, index, &mut path, &mut seen_chains, &mut rings);
        }

        tracing::debug!(rings = rings.len(), "shell chain detection complete");
        rings
    }

    fn extend_chain(
        &self,
        graph: &TransactionGraph,
        index: &AdjacencyIndex,
        path: &mut Vec<String>,
        seen: &mut HashSet<String>,
        rings: &mut Vec<FraudRing>,
    ) {
        let current = path.last().expect("path never empty").clone();

        for next in index.out_neighbors(&current) {
            let Some(next_node) = graph.node(next) else {
                continue;
            };

            if self.is_shell_candidate(next_node) {
                if path.iter().any(|id| id == next) {
                    continue;
                }
                path.push(next.clone());
                self.extend_chain(graph, index, path, seen, rings);
                path.pop();
            } else if path.len() >= self.config.min_chain_nodes
                && path[1..].iter().any(|id| {
                    graph.node(id).is_some_and(|n| self.is_shell_candidate(n))
                })
            {
                // Terminal account reached with enough shell hops behind it.
                let mut members = path.clone();
                members.push(next.clone());

                let key = members.join("->");
                if !seen.insert(key) {
                    continue;
                }

                let id = format!("SHELL_{:03}", rings.len() + 1);
                rings.push(FraudRing {
                    id,
                    ring_type: RingType::Shell,
                    risk_score: self.config.risk_score,
                    detail: format!(
                        "Funds layered through {} pass-through accounts",
                        members.len().saturating_sub(2)
                    ),
                    members,
                });
            }
        }
    }
}

impl ForensicKernel for ShellChainDetector {
    fn metadata(&self) -> &DetectorMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;
    use crate::types::Transaction;
    use chrono::DateTime;

    fn tx(id: &str, from: &str, to: &str, secs: i64) -> Transaction {
        Transaction {
            id: id.to_string(),
            sender_id: from.to_string(),
            receiver_id: to.to_string(),
            amount: 5000.0,
            timestamp: DateTime::from_timestamp(secs, 0).expect("valid timestamp"),
        }
    }

    fn detect(txs: &[Transaction]) -> Vec<FraudRing> {
        let graph = GraphBuilder::build(txs);
        let index = AdjacencyIndex::build(&graph);
        ShellChainDetector::new().detect(&graph, &index)
    }

    /// Start and End are made non-shell by extra unrelated activity.
    fn create_chain_transactions() -> Vec<Transaction> {
        vec![
            tx("T1", "Start", "S1", 0),
            tx("T2", "S1", "S2", 60),
            tx("T3", "S2", "End", 120),
            // Pad Start/End past the shell activity band.
            tx("T4", "Start", "X1", 200),
            tx("T5", "Start", "X2", 260),
            tx("T6", "Start", "X3", 320),
            tx("T7", "End", "X1", 400),
            tx("T8", "End", "X2", 460),
            tx("T9", "End", "X3", 520),
        ]
    }

    #[test]
    fn test_chain_detected() {
        let rings = detect(&create_chain_transactions());

        assert_eq!(rings.len(), 1);
        let ring = &rings[0];
        assert_eq!(ring.id, "SHELL_001");
        assert_eq!(ring.ring_type, RingType::Shell);
        assert!((ring.risk_score - 80.0).abs() < f64::EPSILON);
        assert_eq!(ring.members, vec!["Start", "S1", "S2", "End"]);
    }

    #[test]
    fn test_single_hop_too_short() {
        // Start -> S1 -> End has only one shell hop.
        let rings = detect(&[
            tx("T1", "Start", "S1", 0),
            tx("T2", "S1", "End", 60),
            tx("T3", "Start", "X1", 120),
            tx("T4", "Start", "X2", 180),
            tx("T5", "Start", "X3", 240),
            tx("T6", "End", "X1", 300),
            tx("T7", "End", "X2", 360),
            tx("T8", "End", "X3", 420),
        ]);
        assert!(rings.is_empty());
    }

    #[test]
    fn test_busy_intermediary_breaks_chain() {
        // S2 gains extra traffic and stops being a shell candidate, so the
        // chain terminates at S2 after a single hop.
        let mut txs = create_chain_transactions();
        txs.push(tx("TA", "Y1", "S2", 600));
        txs.push(tx("TB", "Y2", "S2", 660));

        let rings = detect(&txs);
        assert!(rings.is_empty());
    }

    #[test]
    fn test_shell_candidate_profile() {
        let detector = ShellChainDetector::new();

        let mut passthrough = Node::new("P");
        passthrough.in_degree = 1;
        passthrough.out_degree = 1;
        assert!(detector.is_shell_candidate(&passthrough));

        let mut sink = Node::new("K");
        sink.in_degree = 3;
        sink.out_degree = 0;
        assert!(!detector.is_shell_candidate(&sink));

        let mut busy = Node::new("B");
        busy.in_degree = 2;
        busy.out_degree = 2;
        assert!(!detector.is_shell_candidate(&busy));
    }

    #[test]
    fn test_branching_chains_both_reported() {
        // S1 forwards to two separate shells, each reaching its own
        // terminal.
        let rings = detect(&[
            tx("T1", "Start", "S1", 0),
            tx("T2", "S1", "S2", 60),
            tx("T3", "S1", "S3", 120),
            tx("T4", "S2", "End1", 180),
            tx("T5", "S3", "End2", 240),
            tx("T6", "Start", "X1", 300),
            tx("T7", "Start", "X2", 360),
            tx("T8", "Start", "X3", 420),
            tx("T9", "End1", "X1", 480),
            tx("T10", "End1", "X2", 540),
            tx("T11", "End1", "X3", 600),
            tx("T12", "End2", "X1", 660),
            tx("T13", "End2", "X2", 720),
            tx("T14", "End2", "X3", 780),
        ]);

        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].members, vec!["Start", "S1", "S2", "End1"]);
        assert_eq!(rings[1].members, vec!["Start", "S1", "S3", "End2"]);
    }
}
