//! Smurfing (structuring) detection.
//!
//! Finds aggregation and dispersal hubs:
//! - Fan-in: many distinct senders funneling into one low-outflow account
//! - Fan-out: one low-inflow account dispersing to many distinct receivers
//!
//! Both checks require the transfers to cluster in time (the velocity
//! check); a high fan degree spread over months is ordinary commerce.

use crate::graph::AdjacencyIndex;
use crate::types::{FraudRing, Node, RingType, TransactionGraph};
use chrono::{DateTime, Duration, Utc};
use fraudgraph_core::{detector::DetectorMetadata, detector::ForensicKernel, domain::Domain};
use std::collections::HashSet;

/// Configuration for fan-in/fan-out detection.
#[derive(Debug, Clone)]
pub struct SmurfingConfig {
    /// Minimum fan degree and distinct counterparties for a hub.
    pub fan_threshold: u32,
    /// Maximum degree on the opposite side of a pass-through hub.
    pub counter_degree_limit: u32,
    /// Skip nodes with both degrees at or above this bound; bidirectional
    /// high-volume accounts are presumed legitimate (merchants, payroll).
    pub bidirectional_guard: u32,
    /// Number of timestamps that must cluster inside the window.
    pub velocity_count: usize,
    /// Sliding window width in hours.
    pub window_hours: i64,
    /// Fixed risk score assigned to fan rings.
    pub risk_score: f64,
}

impl Default for SmurfingConfig {
    fn default() -> Self {
        Self {
            fan_threshold: 10,
            counter_degree_limit: 2,
            bidirectional_guard: 5,
            velocity_count: 10,
            window_hours: 72,
            risk_score: 85.0,
        }
    }
}

/// Fan-in/fan-out aggregation-dispersal kernel.
///
/// The two checks are evaluated independently per node, so an account can
/// trigger both. Complexity O(k log k) per node for k touching edges, from
/// the timestamp sort in the velocity check.
#[derive(Debug, Clone)]
pub struct SmurfingDetector {
    metadata: DetectorMetadata,
    config: SmurfingConfig,
}

impl Default for SmurfingDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SmurfingDetector {
    /// Create a detector with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SmurfingConfig::default())
    }

    /// Create a detector with explicit thresholds.
    #[must_use]
    pub fn with_config(config: SmurfingConfig) -> Self {
        Self {
            metadata: DetectorMetadata::new("forensics/smurfing", Domain::Compliance)
                .with_description("Fan-in/fan-out structuring with temporal velocity check"),
            config,
        }
    }

    /// Detect fan-in and fan-out hubs across the graph.
    #[must_use]
    pub fn detect(&self, graph: &TransactionGraph, index: &AdjacencyIndex) -> Vec<FraudRing> {
        let mut rings = Vec::new();
        let mut fan_in_seq = 0usize;
        let mut fan_out_seq = 0usize;

        for node in &graph.nodes {
            if node.in_degree >= self.config.bidirectional_guard
                && node.out_degree >= self.config.bidirectional_guard
            {
                continue;
            }

            if let Some(ring) = self.check_fan(graph, index, node, RingType::FanIn) {
                fan_in_seq += 1;
                rings.push(FraudRing {
                    id: format!("FANIN_{fan_in_seq:03}"),
                    ..ring
                });
            }
            if let Some(ring) = self.check_fan(graph, index, node, RingType::FanOut) {
                fan_out_seq += 1;
                rings.push(FraudRing {
                    id: format!("FANOUT_{fan_out_seq:03}"),
                    ..ring
                });
            }
        }

        tracing::debug!(rings = rings.len(), "smurfing detection complete");
        rings
    }

    /// Evaluate one direction of the fan check for a node.
    ///
    /// Returns a ring without a final id; the caller assigns the
    /// per-typology sequence number.
    fn check_fan(
        &self,
        graph: &TransactionGraph,
        index: &AdjacencyIndex,
        node: &Node,
        direction: RingType,
    ) -> Option<FraudRing> {
        let (fan_degree, counter_degree, link_indices) = match direction {
            RingType::FanIn => (node.in_degree, node.out_degree, index.links_to(&node.id)),
            RingType::FanOut => (node.out_degree, node.in_degree, index.links_from(&node.id)),
            _ => return None,
        };

        if fan_degree < self.config.fan_threshold
            || counter_degree > self.config.counter_degree_limit
        {
            return None;
        }

        // Distinct counterparties in first-seen edge order, so ring member
        // order is deterministic.
        let mut counterparties: Vec<String> = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut timestamps: Vec<DateTime<Utc>> = Vec::with_capacity(link_indices.len());

        for &i in link_indices {
            let link = &graph.links[i];
            let other = match direction {
                RingType::FanIn => link.source.as_str(),
                _ => link.target.as_str(),
            };
            if seen.insert(other) {
                counterparties.push(other.to_string());
            }
            timestamps.push(link.timestamp);
        }

        if counterparties.len() < self.config.fan_threshold as usize {
            return None;
        }

        if !exceeds_velocity(
            &mut timestamps,
            self.config.velocity_count,
            Duration::hours(self.config.window_hours),
        ) {
            return None;
        }

        let detail = match direction {
            RingType::FanIn => format!(
                "{} senders aggregated into {} within a {}h window",
                counterparties.len(),
                node.id,
                self.config.window_hours
            ),
            _ => format!(
                "{} dispersed to {} receivers within a {}h window",
                node.id,
                counterparties.len(),
                self.config.window_hours
            ),
        };

        let mut members = Vec::with_capacity(counterparties.len() + 1);
        members.push(node.id.clone());
        members.extend(counterparties);

        Some(FraudRing {
            id: String::new(),
            ring_type: direction,
            risk_score: self.config.risk_score,
            members,
            detail,
        })
    }
}

impl ForensicKernel for SmurfingDetector {
    fn metadata(&self) -> &DetectorMetadata {
        &self.metadata
    }
}

/// Minimum-density sliding-window check.
///
/// Sorts the timestamps ascending and slides a window of exactly `count`
/// consecutive entries; succeeds if any window spans at most `window`.
/// Contiguity in the original edge order is not required, only that some
/// `count` timestamps cluster once sorted. Fails outright when fewer than
/// `count` timestamps are supplied.
pub(crate) fn exceeds_velocity(
    timestamps: &mut [DateTime<Utc>],
    count: usize,
    window: Duration,
) -> bool {
    if count == 0 || timestamps.len() < count {
        return false;
    }

    timestamps.sort_unstable();
    timestamps
        .windows(count)
        .any(|w| w[count - 1] - w[0] <= window)
}
