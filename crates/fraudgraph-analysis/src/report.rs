//! JSON report boundary.
//!
//! Maps an `AnalysisResult` onto the export schema consumed by reporting
//! collaborators. Field names and nesting are a compatibility surface and
//! must not change.

use crate::types::{AnalysisResult, FraudRing, SuspiciousAccount};
use fraudgraph_core::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// A flagged account in the export schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspiciousAccountReport {
    /// Account id.
    pub account_id: String,
    /// Suspicion score, rounded to one decimal.
    pub suspicion_score: f64,
    /// Accumulated pattern labels.
    pub detected_patterns: Vec<String>,
    /// First containing ring, or null.
    pub ring_id: Option<String>,
}

/// A detected ring in the export schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudRingReport {
    /// Ring id.
    pub ring_id: String,
    /// Member account ids.
    pub member_accounts: Vec<String>,
    /// Typology label (`cycle`, `fan_in`, `fan_out`, `shell`).
    pub pattern_type: String,
    /// Ring risk score, rounded to one decimal.
    pub risk_score: f64,
}

/// Summary block of the export schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Distinct accounts analyzed.
    pub total_accounts_analyzed: usize,
    /// Accounts flagged in at least one ring.
    pub suspicious_accounts_flagged: usize,
    /// Rings detected.
    pub fraud_rings_detected: usize,
    /// Pipeline wall-clock time in seconds, rounded to two decimals.
    pub processing_time_seconds: f64,
}

/// The full export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Flagged accounts, descending by score.
    pub suspicious_accounts: Vec<SuspiciousAccountReport>,
    /// Detected rings in detection order.
    pub fraud_rings: Vec<FraudRingReport>,
    /// Summary counts.
    pub summary: ReportSummary,
}

impl AnalysisReport {
    /// Build the export document from an analysis result.
    #[must_use]
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            suspicious_accounts: result
                .suspicious_accounts
                .iter()
                .map(SuspiciousAccountReport::from)
                .collect(),
            fraud_rings: result.fraud_rings.iter().map(FraudRingReport::from).collect(),
            summary: ReportSummary {
                total_accounts_analyzed: result.summary.total_accounts,
                suspicious_accounts_flagged: result.summary.flagged_accounts,
                fraud_rings_detected: result.summary.rings_detected,
                processing_time_seconds: round_to(result.processing_time.as_secs_f64(), 2),
            },
        }
    }

    /// Serialize the report to a compact JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| AnalysisError::serialization(e.to_string()))
    }

    /// Serialize the report to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| AnalysisError::serialization(e.to_string()))
    }
}

impl From<&SuspiciousAccount> for SuspiciousAccountReport {
    fn from(account: &SuspiciousAccount) -> Self {
        Self {
            account_id: account.account_id.clone(),
            suspicion_score: round_to(account.suspicion_score, 1),
            detected_patterns: account.detected_patterns.clone(),
            ring_id: account.ring_id.clone(),
        }
    }
}

impl From<&FraudRing> for FraudRingReport {
    fn from(ring: &FraudRing) -> Self {
        Self {
            ring_id: ring.id.clone(),
            member_accounts: ring.members.clone(),
            pattern_type: ring.ring_type.as_str().to_string(),
            risk_score: round_to(ring.risk_score, 1),
        }
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
