//! Graph construction kernels.
//!
//! This module turns the validated transaction list into the directed
//! multigraph every detector reads, plus the adjacency index derived from it:
//! - `GraphBuilder` - accounts become nodes, transactions become edges
//! - `AdjacencyIndex` - outgoing-neighbor lists and edges grouped by endpoint

use crate::types::{Link, Transaction, TransactionGraph};
use fraudgraph_core::{detector::DetectorMetadata, detector::ForensicKernel, domain::Domain};
use std::collections::HashMap;

// ============================================================================
// Graph Builder
// ============================================================================

/// Builds the transaction multigraph.
///
/// One node per distinct account id in first-seen order, one edge per
/// transaction in input order. Self-loops, duplicate transaction ids, and
/// zero amounts are structurally valid edges and pass through untouched.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    metadata: DetectorMetadata,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a new graph builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: DetectorMetadata::new("forensics/graph-builder", Domain::GraphAnalytics)
                .with_description("Transaction list to directed multigraph conversion"),
        }
    }

    /// Build the graph from an ordered transaction sequence. O(T).
    #[must_use]
    pub fn build(transactions: &[Transaction]) -> TransactionGraph {
        let mut graph = TransactionGraph::new();

        for tx in transactions {
            {
                let sender = graph.node_mut_or_insert(&tx.sender_id);
                sender.out_degree += 1;
                sender.total_out += tx.amount;
            }
            {
                let receiver = graph.node_mut_or_insert(&tx.receiver_id);
                receiver.in_degree += 1;
                receiver.total_in += tx.amount;
            }

            graph.push_link(Link {
                source: tx.sender_id.clone(),
                target: tx.receiver_id.clone(),
                amount: tx.amount,
                timestamp: tx.timestamp,
                transaction_id: tx.id.clone(),
            });
        }

        graph
    }
}

impl ForensicKernel for GraphBuilder {
    fn metadata(&self) -> &DetectorMetadata {
        &self.metadata
    }
}

// ============================================================================
// Adjacency Index
// ============================================================================

/// Lookup structures derived once from the graph's links.
///
/// Shared read-only by all detectors; no detector mutates it, so no
/// synchronization is needed.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    /// Outgoing neighbor ids per account, one entry per edge.
    ///
    /// Duplicates are preserved deliberately: chain traversal weights a
    /// neighbor by its edge multiplicity.
    out_neighbors: HashMap<String, Vec<String>>,
    /// Link indices grouped by source account.
    by_source: HashMap<String, Vec<usize>>,
    /// Link indices grouped by target account.
    by_target: HashMap<String, Vec<usize>>,
}

impl AdjacencyIndex {
    /// Build the index from a graph. O(L).
    #[must_use]
    pub fn build(graph: &TransactionGraph) -> Self {
        let mut index = Self::default();

        for (i, link) in graph.links.iter().enumerate() {
            index
                .out_neighbors
                .entry(link.source.clone())
                .or_default()
                .push(link.target.clone());
            index
                .by_source
                .entry(link.source.clone())
                .or_default()
                .push(i);
            index
                .by_target
                .entry(link.target.clone())
                .or_default()
                .push(i);
        }

        index
    }

    /// Outgoing neighbors of an account, edge order, duplicates preserved.
    #[must_use]
    pub fn out_neighbors(&self, id: &str) -> &[String] {
        self.out_neighbors.get(id).map_or(&[], Vec::as_slice)
    }

    /// Indices of links originating at an account.
    #[must_use]
    pub fn links_from(&self, id: &str) -> &[usize] {
        self.by_source.get(id).map_or(&[], Vec::as_slice)
    }

    /// Indices of links terminating at an account.
    #[must_use]
    pub fn links_to(&self, id: &str) -> &[usize] {
        self.by_target.get(id).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).expect("valid timestamp")
    }

    fn tx(id: &str, from: &str, to: &str, amount: f64, secs: i64) -> Transaction {
        Transaction {
            id: id.to_string(),
            sender_id: from.to_string(),
            receiver_id: to.to_string(),
            amount,
            timestamp: ts(secs),
        }
    }

    #[test]
    fn test_build_degrees_and_totals() {
        let txs = vec![
            tx("T1", "A", "B", 100.0, 0),
            tx("T2", "A", "C", 50.0, 60),
            tx("T3", "B", "A", 25.0, 120),
        ];
        let graph = GraphBuilder::build(&txs);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.link_count(), 3);

        let a = graph.node("A").unwrap();
        assert_eq!(a.out_degree, 2);
        assert_eq!(a.in_degree, 1);
        assert!((a.total_out - 150.0).abs() < f64::EPSILON);
        assert!((a.total_in - 25.0).abs() < f64::EPSILON);

        let b = graph.node("B").unwrap();
        assert_eq!(b.in_degree, 1);
        assert_eq!(b.out_degree, 1);
    }

    #[test]
    fn test_build_first_seen_node_order() {
        let txs = vec![tx("T1", "X", "Y", 1.0, 0), tx("T2", "A", "X", 1.0, 1)];
        let graph = GraphBuilder::build(&txs);
        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["X", "Y", "A"]);
    }

    #[test]
    fn test_build_tolerates_self_loop_and_zero_amount() {
        let txs = vec![tx("T1", "A", "A", 0.0, 0)];
        let graph = GraphBuilder::build(&txs);

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.link_count(), 1);
        let a = graph.node("A").unwrap();
        assert_eq!(a.in_degree, 1);
        assert_eq!(a.out_degree, 1);
    }

    #[test]
    fn test_index_preserves_edge_multiplicity() {
        let txs = vec![
            tx("T1", "A", "B", 10.0, 0),
            tx("T2", "A", "B", 20.0, 60),
            tx("T3", "A", "C", 30.0, 120),
        ];
        let graph = GraphBuilder::build(&txs);
        let index = AdjacencyIndex::build(&graph);

        assert_eq!(index.out_neighbors("A"), ["B", "B", "C"]);
        assert_eq!(index.links_from("A"), [0, 1, 2]);
        assert_eq!(index.links_to("B"), [0, 1]);
        assert!(index.out_neighbors("B").is_empty());
        assert!(index.links_to("missing").is_empty());
    }
}
