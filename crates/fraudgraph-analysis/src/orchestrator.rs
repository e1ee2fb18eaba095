//! Pipeline orchestration.
//!
//! Sequences build -> index -> detect -> score and assembles the single
//! immutable `AnalysisResult`. The call is all-or-nothing: no partial
//! results are ever produced.

use crate::cycles::{CycleConfig, CycleDetector};
use crate::graph::{AdjacencyIndex, GraphBuilder};
use crate::scoring::{ScoreWeights, SuspicionScorer};
use crate::shell::{ShellChainConfig, ShellChainDetector};
use crate::smurfing::{SmurfingConfig, SmurfingDetector};
use crate::types::{AnalysisResult, AnalysisSummary, Transaction};
use std::time::Instant;

/// Aggregated configuration for a full analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    /// Cycle detector thresholds.
    pub cycles: CycleConfig,
    /// Smurfing detector thresholds.
    pub smurfing: SmurfingConfig,
    /// Shell chain detector thresholds.
    pub shell: ShellChainConfig,
    /// Scoring weights.
    pub weights: ScoreWeights,
}

/// Runs the full forensic pipeline over a transaction list.
///
/// All three detectors read the same immutable graph and index and produce
/// independent ring lists; their outputs are merged in the fixed order
/// cycle -> fan-in/fan-out -> shell, which keeps ring-id first-match
/// semantics in the scorer reproducible. The scorer is the only component
/// that mutates the graph, and it runs exactly once, strictly after every
/// detector has returned.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOrchestrator {
    cycles: CycleDetector,
    smurfing: SmurfingDetector,
    shell: ShellChainDetector,
    scorer: SuspicionScorer,
}

impl AnalysisOrchestrator {
    /// Create an orchestrator with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an orchestrator with explicit thresholds.
    #[must_use]
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            cycles: CycleDetector::with_config(config.cycles),
            smurfing: SmurfingDetector::with_config(config.smurfing),
            shell: ShellChainDetector::with_config(config.shell),
            scorer: SuspicionScorer::with_weights(config.weights),
        }
    }

    /// Analyze a validated transaction list.
    ///
    /// Empty input yields a valid empty result, not an error. Running the
    /// analysis twice on the same input yields identical rings and
    /// suspects.
    #[must_use]
    pub fn analyze(&self, transactions: &[Transaction]) -> AnalysisResult {
        let started = Instant::now();

        let mut graph = GraphBuilder::build(transactions);
        let index = AdjacencyIndex::build(&graph);
        tracing::debug!(
            accounts = graph.node_count(),
            links = graph.link_count(),
            "transaction graph built"
        );

        let mut fraud_rings = self.cycles.detect(&graph, &index);
        fraud_rings.extend(self.smurfing.detect(&graph, &index));
        fraud_rings.extend(self.shell.detect(&graph, &index));

        let suspicious_accounts = self.scorer.score(&mut graph, &fraud_rings);

        let summary = AnalysisSummary {
            total_accounts: graph.node_count(),
            flagged_accounts: suspicious_accounts.len(),
            rings_detected: fraud_rings.len(),
            total_transactions: transactions.len(),
        };

        let processing_time = started.elapsed();
        tracing::info!(
            accounts = summary.total_accounts,
            rings = summary.rings_detected,
            flagged = summary.flagged_accounts,
            elapsed_ms = processing_time.as_millis() as u64,
            "forensic analysis complete"
        );

        AnalysisResult {
            graph,
            fraud_rings,
            suspicious_accounts,
            processing_time,
            summary,
        }
    }
}
