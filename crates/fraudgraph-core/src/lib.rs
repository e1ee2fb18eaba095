//! # Fraudgraph Core
//!
//! Core abstractions for the fraudgraph transaction forensics library.
//!
//! This crate provides:
//! - Domain definitions for detector categorization
//! - Detector metadata and the `ForensicKernel` trait
//! - The shared error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod detector;
pub mod domain;
pub mod error;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::detector::{DetectorMetadata, ForensicKernel};
    pub use crate::domain::Domain;
    pub use crate::error::{AnalysisError, Result};
}
