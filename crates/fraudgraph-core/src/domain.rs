//! Domain definitions for detector categorization.
//!
//! Detectors are organized into domains representing distinct analytical
//! areas. Domains are used for detector discovery and report grouping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Analytical domain for detector categorization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Domain {
    /// Graph analytics: topology, traversal, cycle enumeration
    GraphAnalytics,

    /// Compliance: AML typologies, smurfing, layering, scoring
    Compliance,
}

impl Domain {
    /// All available domains.
    pub const ALL: &'static [Domain] = &[Domain::GraphAnalytics, Domain::Compliance];

    /// Returns the domain name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Domain::GraphAnalytics => "GraphAnalytics",
            Domain::Compliance => "Compliance",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_display() {
        assert_eq!(Domain::GraphAnalytics.to_string(), "GraphAnalytics");
        assert_eq!(Domain::Compliance.to_string(), "Compliance");
    }

    #[test]
    fn test_all_domains_listed() {
        assert_eq!(Domain::ALL.len(), 2);
    }
}
