//! Per-account suspicion scoring.
//!
//! Folds every detected ring into the graph's nodes: pattern labels
//! accumulate per member, then an additive capped score is computed from the
//! accumulated label set. This is the only mutation of the graph after build
//! time, and it runs strictly after all detectors have returned.

use crate::types::{FraudRing, RingType, SuspiciousAccount, TransactionGraph};
use fraudgraph_core::{detector::DetectorMetadata, detector::ForensicKernel, domain::Domain};
use std::collections::{HashMap, HashSet};

/// Additive pattern weights, capped at `cap`.
#[derive(Debug, Clone)]
pub struct ScoreWeights {
    /// Weight of the `cycle` pattern.
    pub cycle: f64,
    /// Weight of the `fan_in` pattern.
    pub fan_in: f64,
    /// Weight of the `fan_out` pattern.
    pub fan_out: f64,
    /// Weight of the `shell` pattern.
    pub shell: f64,
    /// Weight of the `high_velocity` pattern.
    pub high_velocity: f64,
    /// Upper bound on the summed score.
    pub cap: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            cycle: 50.0,
            fan_in: 30.0,
            fan_out: 30.0,
            shell: 25.0,
            high_velocity: 15.0,
            cap: 100.0,
        }
    }
}

impl ScoreWeights {
    /// Weight contributed by a single pattern label.
    ///
    /// Descriptive variants (`cycle_length_3`, `fan_in_aggregation`, ...)
    /// carry no weight of their own; only the base labels score.
    #[must_use]
    pub fn weight_of(&self, pattern: &str) -> f64 {
        match pattern {
            "cycle" => self.cycle,
            "fan_in" => self.fan_in,
            "fan_out" => self.fan_out,
            "shell" => self.shell,
            "high_velocity" => self.high_velocity,
            _ => 0.0,
        }
    }
}

/// Multi-factor suspicion scoring kernel.
#[derive(Debug, Clone)]
pub struct SuspicionScorer {
    metadata: DetectorMetadata,
    weights: ScoreWeights,
}

impl Default for SuspicionScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SuspicionScorer {
    /// Create a scorer with default weights.
    #[must_use]
    pub fn new() -> Self {
        Self::with_weights(ScoreWeights::default())
    }

    /// Create a scorer with explicit weights.
    #[must_use]
    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self {
            metadata: DetectorMetadata::new("forensics/suspicion-scoring", Domain::Compliance)
                .with_description("Additive capped per-account risk scoring"),
            weights,
        }
    }

    /// Score every flagged account and build the sorted suspect list.
    ///
    /// `rings` must be in detector concatenation order (cycle -> fan ->
    /// shell): `ring_id` on each suspect is the first ring containing it,
    /// and the flag order keeps ties deterministic.
    pub fn score(
        &self,
        graph: &mut TransactionGraph,
        rings: &[FraudRing],
    ) -> Vec<SuspiciousAccount> {
        // Insertion-ordered flag set: Vec preserves order, HashSet dedups.
        let mut flagged: Vec<String> = Vec::new();
        let mut flagged_set: HashSet<String> = HashSet::new();
        let mut first_ring: HashMap<String, String> = HashMap::new();

        for ring in rings {
            for member in &ring.members {
                let Some(node) = graph.node_mut(member) else {
                    continue;
                };

                node.add_pattern(ring.ring_type.as_str());
                match ring.ring_type {
                    RingType::Cycle => {
                        node.add_pattern(format!("cycle_length_{}", ring.members.len()));
                    }
                    other => node.add_pattern(other.variant_str()),
                }
                if ring.ring_type.is_velocity_pattern() {
                    node.add_pattern("high_velocity");
                }

                if flagged_set.insert(member.clone()) {
                    flagged.push(member.clone());
                }
                first_ring
                    .entry(member.clone())
                    .or_insert_with(|| ring.id.clone());
            }
        }

        let mut suspects = Vec::with_capacity(flagged.len());
        for id in &flagged {
            let Some(node) = graph.node_mut(id) else {
                continue;
            };

            let score: f64 = node
                .patterns
                .iter()
                .map(|p| self.weights.weight_of(p))
                .sum();
            node.risk_score = score.min(self.weights.cap);

            suspects.push(SuspiciousAccount {
                account_id: id.clone(),
                suspicion_score: node.risk_score,
                detected_patterns: node.patterns.clone(),
                ring_id: first_ring.get(id).cloned(),
            });
        }

        // Stable sort: equal scores keep flag insertion order.
        suspects.sort_by(|a, b| {
            b.suspicion_score
                .partial_cmp(&a.suspicion_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        tracing::debug!(flagged = suspects.len(), "suspicion scoring complete");
        suspects
    }
}

impl ForensicKernel for SuspicionScorer {
    fn metadata(&self) -> &DetectorMetadata {
        &self.metadata
    }
}
