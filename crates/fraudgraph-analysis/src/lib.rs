//! # Fraudgraph Analysis
//!
//! Forensic analysis of transaction graphs for money-laundering typologies.
//!
//! ## Detectors
//!
//! - `CycleDetector` - Simple directed cycles of length 3-5 (circular routing)
//! - `SmurfingDetector` - Fan-in/fan-out aggregation-dispersal with velocity check
//! - `ShellChainDetector` - Multi-hop chains through low-activity pass-through accounts
//!
//! ## Pipeline
//!
//! Transactions are turned into a directed multigraph, each detector reads
//! the same immutable graph and adjacency index, and the `SuspicionScorer`
//! folds all detected rings into per-account risk scores. The
//! `AnalysisOrchestrator` sequences the whole pipeline and returns a single
//! immutable `AnalysisResult`.
//!
//! ```
//! use fraudgraph_analysis::orchestrator::AnalysisOrchestrator;
//! use fraudgraph_analysis::types::Transaction;
//!
//! let txs: Vec<Transaction> = Vec::new();
//! let result = AnalysisOrchestrator::new().analyze(&txs);
//! assert_eq!(result.summary.total_transactions, 0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cycles;
pub mod graph;
pub mod orchestrator;
pub mod report;
pub mod scoring;
pub mod shell;
pub mod smurfing;
pub mod types;

pub use cycles::{CycleConfig, CycleDetector};
pub use graph::{AdjacencyIndex, GraphBuilder};
pub use orchestrator::{AnalysisConfig, AnalysisOrchestrator};
pub use report::AnalysisReport;
pub use scoring::{ScoreWeights, SuspicionScorer};
pub use shell::{ShellChainConfig, ShellChainDetector};
pub use smurfing::{SmurfingConfig, SmurfingDetector};
pub use types::{
    AnalysisResult, AnalysisSummary, FraudRing, Link, Node, RingType, SuspiciousAccount,
    Transaction, TransactionGraph,
};
