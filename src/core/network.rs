//! Network topology: nodes with vulnerability and protection tags.

use im::OrdSet;
use serde::{Deserialize, Serialize};

/// Importance tier of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Criticality {
    Low,
    Medium,
    High,
    /// Striking an unprotected critical node ends the game.
    Critical,
}

/// A machine or service in the defended network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkNode {
    /// Display name, unique within a topology.
    pub name: String,

    /// Importance tier.
    pub criticality: Criticality,

    /// Attack type tags this node is exposed to.
    pub vulnerabilities: OrdSet<String>,

    /// Protection categories that can cover this node.
    pub protections: OrdSet<String>,

    /// Covered by a deployed defense.
    #[serde(default)]
    pub protected: bool,

    /// Struck by at least one attack.
    #[serde(default)]
    pub attacked: bool,
}

impl NetworkNode {
    /// Create an unprotected, unattacked node with no tags.
    #[must_use]
    pub fn new(name: impl Into<String>, criticality: Criticality) -> Self {
        Self {
            name: name.into(),
            criticality,
            vulnerabilities: OrdSet::new(),
            protections: OrdSet::new(),
            protected: false,
            attacked: false,
        }
    }

    /// Add vulnerability tags (builder pattern).
    #[must_use]
    pub fn vulnerable_to<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vulnerabilities.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Add protection tags (builder pattern).
    #[must_use]
    pub fn protectable_by<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protections.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Whether this node is critical.
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.criticality == Criticality::Critical
    }

    /// Whether an attack of `attack_type` would strike this node right now.
    #[must_use]
    pub fn is_target_for(&self, attack_type: &str) -> bool {
        !self.protected && self.vulnerabilities.contains(attack_type)
    }

    /// Whether a defense covering `coverage` protects this node.
    #[must_use]
    pub fn is_covered_by(&self, coverage: &OrdSet<String>) -> bool {
        self.protections.iter().any(|tag| coverage.contains(tag))
    }
}

/// The standard three-node network.
///
/// Protection tags mirror each node's exposure so that the matching
/// defense categories cover it.
#[must_use]
pub fn standard_topology() -> Vec<NetworkNode> {
    vec![
        NetworkNode::new("Web Server", Criticality::High)
            .vulnerable_to(["application", "network"])
            .protectable_by(["application", "network"]),
        NetworkNode::new("Database", Criticality::Critical)
            .vulnerable_to(["application", "system"])
            .protectable_by(["application", "system"]),
        NetworkNode::new("User Accounts", Criticality::Medium)
            .vulnerable_to(["social", "authentication"])
            .protectable_by(["social", "authentication"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_selection() {
        let mut node = NetworkNode::new("Web", Criticality::High).vulnerable_to(["network"]);

        assert!(node.is_target_for("network"));
        assert!(!node.is_target_for("social"));

        node.protected = true;
        assert!(!node.is_target_for("network"));
    }

    #[test]
    fn test_coverage() {
        let node = NetworkNode::new("DB", Criticality::Critical).protectable_by(["system", "application"]);

        let coverage: OrdSet<String> = ["system".to_string()].into_iter().collect();
        assert!(node.is_covered_by(&coverage));

        let coverage: OrdSet<String> = ["social".to_string()].into_iter().collect();
        assert!(!node.is_covered_by(&coverage));
    }

    #[test]
    fn test_standard_topology() {
        let nodes = standard_topology();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes.iter().filter(|n| n.is_critical()).count(), 1);
        assert!(nodes.iter().all(|n| !n.protected && !n.attacked));
    }

    #[test]
    fn test_criticality_ordering() {
        assert!(Criticality::Critical > Criticality::High);
        assert!(Criticality::Medium > Criticality::Low);
    }
}
