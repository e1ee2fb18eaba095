//! Detector metadata and the base detector trait.
//!
//! Every detector in the analysis pipeline carries a `DetectorMetadata`
//! describing what it looks for and which domain it belongs to, and exposes
//! it through the `ForensicKernel` trait.

use crate::domain::Domain;
use serde::{Deserialize, Serialize};

/// Metadata describing a forensic detector.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectorMetadata {
    /// Unique detector identifier (e.g., "forensics/cycle-routing").
    pub id: String,

    /// Analytical domain.
    pub domain: Domain,

    /// Human-readable description.
    pub description: String,

    /// Version of the detector implementation.
    pub version: u32,
}

impl DetectorMetadata {
    /// Create new detector metadata.
    #[must_use]
    pub fn new(id: impl Into<String>, domain: Domain) -> Self {
        Self {
            id: id.into(),
            domain,
            description: String::new(),
            version: 1,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the version.
    #[must_use]
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }
}

/// Base trait for all forensic detectors.
pub trait ForensicKernel {
    /// Returns the detector metadata.
    fn metadata(&self) -> &DetectorMetadata;

    /// Returns the detector identifier.
    fn id(&self) -> &str {
        &self.metadata().id
    }
}
