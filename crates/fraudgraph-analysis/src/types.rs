//! Analysis data model: transactions, graph, rings, results.

use chrono::{DateTime, Utc};
use fraudgraph_core::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

// ============================================================================
// Transaction
// ============================================================================

/// A validated financial transaction supplied by the ingestion collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction id.
    pub id: String,
    /// Sending account id.
    pub sender_id: String,
    /// Receiving account id.
    pub receiver_id: String,
    /// Transferred amount (positive under the input contract).
    pub amount: f64,
    /// Absolute instant of the transfer.
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    /// Build a transaction from a raw ingestion record, enforcing the input
    /// contract: non-empty endpoint ids, a finite amount, and an RFC 3339
    /// timestamp.
    ///
    /// An unparseable timestamp is a hard failure, never swallowed: a
    /// silently dropped timestamp would corrupt the sliding-window velocity
    /// check downstream.
    pub fn from_record(
        id: impl Into<String>,
        sender_id: impl Into<String>,
        receiver_id: impl Into<String>,
        amount: f64,
        timestamp: &str,
    ) -> Result<Self> {
        let id = id.into();
        let sender_id = sender_id.into();
        let receiver_id = receiver_id.into();

        if sender_id.is_empty() {
            return Err(AnalysisError::EmptyAccountId {
                transaction_id: id,
                field: "sender",
            });
        }
        if receiver_id.is_empty() {
            return Err(AnalysisError::EmptyAccountId {
                transaction_id: id,
                field: "receiver",
            });
        }
        if !amount.is_finite() {
            return Err(AnalysisError::NonFiniteAmount {
                transaction_id: id,
                amount,
            });
        }

        let timestamp = DateTime::parse_from_rfc3339(timestamp)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|source| AnalysisError::InvalidTimestamp {
                transaction_id: id.clone(),
                value: timestamp.to_string(),
                source,
            })?;

        Ok(Self {
            id,
            sender_id,
            receiver_id,
            amount,
            timestamp,
        })
    }
}

// ============================================================================
// Graph Types
// ============================================================================

/// An account node in the transaction graph.
///
/// Degree and volume counters are set by the graph builder; `risk_score` and
/// `patterns` are written exactly once per run by the suspicion scorer,
/// strictly after all detectors have returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Account id.
    pub id: String,
    /// Number of incoming edges.
    pub in_degree: u32,
    /// Number of outgoing edges.
    pub out_degree: u32,
    /// Total incoming amount.
    pub total_in: f64,
    /// Total outgoing amount.
    pub total_out: f64,
    /// Suspicion score in [0, 100].
    pub risk_score: f64,
    /// Detected pattern labels, insertion-ordered, no duplicates.
    pub patterns: Vec<String>,
}

impl Node {
    /// Create a fresh node with zeroed counters.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            in_degree: 0,
            out_degree: 0,
            total_in: 0.0,
            total_out: 0.0,
            risk_score: 0.0,
            patterns: Vec::new(),
        }
    }

    /// Total transaction count touching this account.
    #[must_use]
    pub fn total_degree(&self) -> u32 {
        self.in_degree + self.out_degree
    }

    /// Append a pattern label if not already present.
    pub fn add_pattern(&mut self, pattern: impl Into<String>) {
        let pattern = pattern.into();
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
    }
}

/// A directed edge in the transaction graph, one per transaction.
///
/// Endpoints are plain id references; resolution to `Node` objects happens
/// only at the boundary to consumers, keeping links serializable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    /// Sending account id.
    pub source: String,
    /// Receiving account id.
    pub target: String,
    /// Transferred amount.
    pub amount: f64,
    /// Instant of the transfer.
    pub timestamp: DateTime<Utc>,
    /// Originating transaction id.
    pub transaction_id: String,
}

/// Directed multigraph over accounts, built once and read-only thereafter.
///
/// Nodes are unique by id in first-seen order; links keep input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionGraph {
    /// Account nodes, first-seen order.
    pub nodes: Vec<Node>,
    /// Edges, one per transaction, input order.
    pub links: Vec<Link>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl TransactionGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Whether an account exists in the graph.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up an account node by id.
    #[must_use]
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Look up an account node mutably by id.
    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        match self.index.get(id) {
            Some(&i) => self.nodes.get_mut(i),
            None => None,
        }
    }

    /// Get the node for `id`, creating it on first sight.
    pub fn node_mut_or_insert(&mut self, id: &str) -> &mut Node {
        let idx = match self.index.get(id) {
            Some(&i) => i,
            None => {
                let i = self.nodes.len();
                self.nodes.push(Node::new(id));
                self.index.insert(id.to_string(), i);
                i
            }
        };
        &mut self.nodes[idx]
    }

    /// Append a link.
    pub fn push_link(&mut self, link: Link) {
        self.links.push(link);
    }
}

// ============================================================================
// Fraud Rings
// ============================================================================

/// Laundering typology of a detected ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingType {
    /// Circular fund routing (3-5 hop directed cycle).
    Cycle,
    /// Many-to-one aggregation at a single account.
    FanIn,
    /// One-to-many dispersal from a single account.
    FanOut,
    /// Layering chain through low-activity pass-through accounts.
    Shell,
}

impl RingType {
    /// Returns the pattern label used in scoring and exports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RingType::Cycle => "cycle",
            RingType::FanIn => "fan_in",
            RingType::FanOut => "fan_out",
            RingType::Shell => "shell",
        }
    }

    /// Returns the descriptive pattern variant appended alongside the base
    /// label (cycles use a length-specific variant instead).
    #[must_use]
    pub const fn variant_str(&self) -> &'static str {
        match self {
            RingType::Cycle => "cycle_routing",
            RingType::FanIn => "fan_in_aggregation",
            RingType::FanOut => "fan_out_dispersal",
            RingType::Shell => "shell_layering",
        }
    }

    /// Whether rings of this type imply a temporal velocity finding.
    #[must_use]
    pub const fn is_velocity_pattern(&self) -> bool {
        matches!(self, RingType::FanIn | RingType::FanOut)
    }
}

impl fmt::Display for RingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detected group of accounts participating in one typology instance.
///
/// Immutable once created. Ids are assigned sequentially per detector type
/// (`RING_001`, `FANIN_001`, `FANOUT_001`, `SHELL_001`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudRing {
    /// Ring id.
    pub id: String,
    /// Typology.
    pub ring_type: RingType,
    /// Fixed typology risk score.
    pub risk_score: f64,
    /// Member account ids, ordered.
    pub members: Vec<String>,
    /// Human-readable description.
    pub detail: String,
}

// ============================================================================
// Analysis Output
// ============================================================================

/// A flagged account, derived from ring membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspiciousAccount {
    /// Account id.
    pub account_id: String,
    /// Accumulated suspicion score in [0, 100].
    pub suspicion_score: f64,
    /// All pattern labels accumulated across rings.
    pub detected_patterns: Vec<String>,
    /// Id of the first ring (in detection order) containing this account.
    pub ring_id: Option<String>,
}

/// Summary counts for an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Distinct accounts in the graph.
    pub total_accounts: usize,
    /// Accounts appearing in at least one ring.
    pub flagged_accounts: usize,
    /// Rings detected across all typologies.
    pub rings_detected: usize,
    /// Input transactions analyzed.
    pub total_transactions: usize,
}

/// The sole artifact returned to collaborators, immutable once constructed.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// The transaction graph, with scorer-written node fields.
    pub graph: TransactionGraph,
    /// All detected rings in concatenation order cycle -> fan -> shell.
    pub fraud_rings: Vec<FraudRing>,
    /// Flagged accounts, sorted descending by suspicion score.
    pub suspicious_accounts: Vec<SuspiciousAccount>,
    /// Wall-clock duration of the whole pipeline.
    pub processing_time: Duration,
    /// Summary counts.
    pub summary: AnalysisSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_record_valid() {
        let tx = Transaction::from_record("T1", "A", "B", 100.0, "2024-03-01T12:00:00Z")
            .expect("valid record");
        assert_eq!(tx.sender_id, "A");
        assert_eq!(tx.receiver_id, "B");
        assert_eq!(tx.timestamp.timestamp(), 1_709_294_400);
    }

    #[test]
    fn test_from_record_rejects_empty_sender() {
        let err = Transaction::from_record("T1", "", "B", 100.0, "2024-03-01T12:00:00Z")
            .unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_from_record_rejects_bad_timestamp() {
        let err =
            Transaction::from_record("T1", "A", "B", 100.0, "not-a-timestamp").unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InvalidTimestamp { ref value, .. } if value == "not-a-timestamp"
        ));
    }

    #[test]
    fn test_from_record_rejects_nan_amount() {
        let err = Transaction::from_record("T1", "A", "B", f64::NAN, "2024-03-01T12:00:00Z")
            .unwrap_err();
        assert!(matches!(err, AnalysisError::NonFiniteAmount { .. }));
    }

    #[test]
    fn test_node_pattern_dedup() {
        let mut node = Node::new("A");
        node.add_pattern("cycle");
        node.add_pattern("cycle");
        node.add_pattern("fan_in");
        assert_eq!(node.patterns, vec!["cycle", "fan_in"]);
    }

    #[test]
    fn test_graph_first_seen_order() {
        let mut graph = TransactionGraph::new();
        graph.node_mut_or_insert("B");
        graph.node_mut_or_insert("A");
        graph.node_mut_or_insert("B");
        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn test_ring_type_labels() {
        assert_eq!(RingType::Cycle.as_str(), "cycle");
        assert_eq!(RingType::FanIn.variant_str(), "fan_in_aggregation");
        assert_eq!(RingType::FanOut.variant_str(), "fan_out_dispersal");
        assert_eq!(RingType::Shell.variant_str(), "shell_layering");
        assert!(RingType::FanIn.is_velocity_pattern());
        assert!(!RingType::Shell.is_velocity_pattern());
    }
}
