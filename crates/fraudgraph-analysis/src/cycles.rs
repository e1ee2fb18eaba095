//! Circular fund routing detection.
//!
//! Enumerates distinct simple directed cycles of 3-5 hops. Short cycles in a
//! payment graph are a key layering indicator: funds leave an account and
//! return to it through a small set of intermediaries.

use crate::graph::AdjacencyIndex;
use crate::types::{FraudRing, RingType, TransactionGraph};
use fraudgraph_core::{detector::DetectorMetadata, detector::ForensicKernel, domain::Domain};
use std::collections::HashSet;

/// Configuration for cycle detection.
#[derive(Debug, Clone)]
pub struct CycleConfig {
    /// Minimum cycle length in edges (inclusive).
    pub min_length: usize,
    /// Maximum cycle length in edges (inclusive); recursion never extends
    /// past this depth.
    pub max_length: usize,
    /// Fixed risk score assigned to every cycle ring.
    pub risk_score: f64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            min_length: 3,
            max_length: 5,
            risk_score: 90.0,
        }
    }
}

/// Simple directed cycle enumeration kernel.
///
/// Runs a depth-bounded DFS from every node, tracking the current path as an
/// ordered sequence plus a membership set for O(1) revisit checks. Push and
/// pop are strictly paired with recursion entry and exit, so the same node
/// can participate in multiple distinct cycles found from different starts.
///
/// Complexity: O(N * d^max_length) for N nodes of average out-degree d.
#[derive(Debug, Clone)]
pub struct CycleDetector {
    metadata: DetectorMetadata,
    config: CycleConfig,
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleDetector {
    /// Create a detector with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CycleConfig::default())
    }

    /// Create a detector with explicit thresholds.
    #[must_use]
    pub fn with_config(config: CycleConfig) -> Self {
        Self {
            metadata: DetectorMetadata::new("forensics/cycle-routing", Domain::GraphAnalytics)
                .with_description("Simple directed cycle enumeration (3-5 hops)"),
            config,
        }
    }

    /// Enumerate distinct cycles and emit one ring per cycle.
    ///
    /// A cycle is recorded when a neighbor equals the DFS start and the
    /// current path holds between `min_length` and `max_length` nodes.
    /// Rotations and direction-reversals over the same node set collapse to
    /// one ring: the sorted comma-joined member signature is the sole
    /// deduplication criterion.
    #[must_use]
    pub fn detect(&self, graph: &TransactionGraph, index: &AdjacencyIndex) -> Vec<FraudRing> {
        let mut rings = Vec::new();
        let mut seen_signatures: HashSet<String> = HashSet::new();

        for start in &graph.nodes {
            let mut path = vec![start.id.clone()];
            let mut on_path: HashSet<String> = HashSet::new();
            on_path.insert(start.id.clone());

            self.dfs(
                &start.id,
                &start.id,
                index,
                &mut path,
                &mut on_path,
                &mut seen_signatures,
                &mut rings,
            );
        }

        tracing::debug!(rings = rings.len(), "cycle enumeration complete");
        rings
    }

    #[allow(clippy::too_many_arguments)]
    fn dfs(
        &self,
        start: &str,
        current: &str,
        index: &AdjacencyIndex,
        path: &mut Vec<String>,
        on_path: &mut HashSet<String>,
        seen: &mut HashSet<String>,
        rings: &mut Vec<FraudRing>,
    ) {
        for neighbor in index.out_neighbors(current) {
            if neighbor == start {
                // Closing edge back to the start: count only 3-5 node loops,
                // rejecting 2-cycles and self-loops.
                if path.len() >= self.config.min_length && path.len() <= self.config.max_length {
                    self.record_cycle(path, seen, rings);
                }
                continue;
            }

            if path.len() >= self.config.max_length || on_path.contains(neighbor) {
                continue;
            }

            path.push(neighbor.clone());
            on_path.insert(neighbor.clone());
            self.dfs(start, neighbor, index, path, on_path, seen, rings);
            let popped = path.pop();
            debug_assert_eq!(popped.as_deref(), Some(neighbor.as_str()));
            on_path.remove(neighbor);
        }
    }

    fn record_cycle(
        &self,
        path: &[String],
        seen: &mut HashSet<String>,
        rings: &mut Vec<FraudRing>,
    ) {
        let mut sorted: Vec<&str> = path.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        let signature = sorted.join(",");
        if !seen.insert(signature) {
            return;
        }

        let id = format!("RING_{:03}", rings.len() + 1);
        rings.push(FraudRing {
            id,
            ring_type: RingType::Cycle,
            risk_score: self.config.risk_score,
            members: path.to_vec(),
            detail: format!("Circular fund routing through {} accounts", path.len()),
        });
    }
}

impl ForensicKernel for CycleDetector {
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
            amount: 1000.0,
            timestamp: DateTime::from_timestamp(secs, 0).expect("valid timestamp"),
        }
    }

    fn detect(txs: &[Transaction]) -> Vec<FraudRing> {
        let graph = GraphBuilder::build(txs);
        let index = AdjacencyIndex::build(&graph);
        CycleDetector::new().detect(&graph, &index)
    }

    #[test]
    fn test_triangle_yields_one_ring() {
        let rings = detect(&[
            tx("T1", "A", "B", 0),
            tx("T2", "B", "C", 60),
            tx("T3", "C", "A", 120),
        ]);

        assert_eq!(rings.len(), 1);
        let ring = &rings[0];
        assert_eq!(ring.id, "RING_001");
        assert_eq!(ring.ring_type, RingType::Cycle);
        assert!((ring.risk_score - 90.0).abs() < f64::EPSILON);

        let mut members = ring.members.clone();
        members.sort();
        assert_eq!(members, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_two_cycle_and_self_loop_rejected() {
        let rings = detect(&[
            tx("T1", "A", "B", 0),
            tx("T2", "B", "A", 60),
            tx("T3", "C", "C", 120),
        ]);
        assert!(rings.is_empty());
    }

    #[test]
    fn test_rotations_deduplicated() {
        // The same triangle is reachable from all three start nodes; only
        // one ring must survive.
        let rings = detect(&[
            tx("T1", "A", "B", 0),
            tx("T2", "B", "C", 60),
            tx("T3", "C", "A", 120),
            tx("T4", "A", "D", 180),
        ]);
        assert_eq!(rings.len(), 1);
    }

    #[test]
    fn test_reverse_cycle_same_node_set_dedups() {
        // A->B->C->D->A and its reverse D->C->B->A->D share the node set,
        // so signature equality collapses them to one ring.
        let rings = detect(&[
            tx("T1", "A", "B", 0),
            tx("T2", "B", "C", 60),
            tx("T3", "C", "D", 120),
            tx("T4", "D", "A", 180),
            tx("T5", "A", "D", 240),
            tx("T6", "D", "C", 300),
            tx("T7", "C", "B", 360),
            tx("T8", "B", "A", 420),
        ]);

        let four_cycles: Vec<_> = rings.iter().filter(|r| r.members.len() == 4).collect();
        assert_eq!(four_cycles.len(), 1);
    }

    #[test]
    fn test_six_cycle_not_found() {
        let rings = detect(&[
            tx("T1", "A", "B", 0),
            tx("T2", "B", "C", 60),
            tx("T3", "C", "D", 120),
            tx("T4", "D", "E", 180),
            tx("T5", "E", "F", 240),
            tx("T6", "F", "A", 300),
        ]);
        assert!(rings.is_empty());
    }

    #[test]
    fn test_five_cycle_found() {
        let rings = detect(&[
            tx("T1", "A", "B", 0),
            tx("T2", "B", "C", 60),
            tx("T3", "C", "D", 120),
            tx("T4", "D", "E", 180),
            tx("T5", "E", "A", 240),
        ]);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].members.len(), 5);
    }

    #[test]
    fn test_node_in_two_distinct_cycles() {
        // B participates in two different triangles.
        let rings = detect(&[
            tx("T1", "A", "B", 0),
            tx("T2", "B", "C", 60),
            tx("T3", "C", "A", 120),
            tx("T4", "B", "D", 180),
            tx("T5", "D", "E", 240),
            tx("T6", "E", "B", 300),
        ]);
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0].id, "RING_001");
        assert_eq!(rings[1].id, "RING_002");
    }
}
