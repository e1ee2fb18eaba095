//! Error types for fraudgraph.

use thiserror::Error;

/// Result type alias using `AnalysisError`.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur at the boundaries of the analysis core.
///
/// The analysis pipeline itself is pure in-memory computation and does not
/// fail; errors surface at the ingestion boundary (input contract
/// violations) and at the export boundary (serialization).
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A transaction referenced an empty sender or receiver id.
    #[error("Transaction {transaction_id}: empty {field} id")]
    EmptyAccountId {
        /// Offending transaction id.
        transaction_id: String,
        /// Which endpoint was empty ("sender" or "receiver").
        field: &'static str,
    },

    /// A transaction carried a NaN or infinite amount.
    #[error("Transaction {transaction_id}: amount {amount} is not finite")]
    NonFiniteAmount {
        /// Offending transaction id.
        transaction_id: String,
        /// The rejected amount.
        amount: f64,
    },

    /// A transaction timestamp could not be parsed into an absolute instant.
    ///
    /// This is a hard failure of the input contract: a silently dropped or
    /// mis-ordered timestamp would corrupt the sliding-window velocity
    /// guarantee downstream.
    #[error("Transaction {transaction_id}: invalid timestamp {value:?}: {source}")]
    InvalidTimestamp {
        /// Offending transaction id.
        transaction_id: String,
        /// The raw timestamp string.
        value: String,
        /// Underlying parse error.
        #[source]
        source: chrono::ParseError,
    },

    /// Report serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AnalysisError {
    /// Create a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        AnalysisError::Serialization(msg.into())
    }

    /// Returns true if this error indicates a violated input contract.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::EmptyAccountId { .. }
                | AnalysisError::NonFiniteAmount { .. }
                | AnalysisError::InvalidTimestamp { .. }
        )
    }
}
