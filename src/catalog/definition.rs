//! Attack and defense definitions - static catalog data.
//!
//! Definitions never change during a game. Per-game copies of mutable
//! pieces (a defense's effectiveness values) live in `DeployedDefense`.

use im::{OrdMap, OrdSet};
use serde::{Deserialize, Serialize};

use crate::core::MoveId;

/// An attack the attacker can launch.
///
/// ```
/// use netwar::catalog::AttackDefinition;
///
/// let dos = AttackDefinition::new("dos", "DDoS Attack", "network", 3, 0.7);
/// assert_eq!(dos.attack_type, "network");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackDefinition {
    pub id: MoveId,
    pub name: String,
    /// Vulnerability tag this attack exploits.
    #[serde(rename = "type")]
    pub attack_type: String,
    pub cost: u32,
    /// Base damage in [0, 1].
    pub success_rate: f64,
}

impl AttackDefinition {
    #[must_use]
    pub fn new(
        id: impl Into<MoveId>,
        name: impl Into<String>,
        attack_type: impl Into<String>,
        cost: u32,
        success_rate: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attack_type: attack_type.into(),
            cost,
            success_rate,
        }
    }
}

/// Extra effect some defenses carry on top of protection and boost.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum SecondaryEffect {
    /// Restore security for every node that was attacked and is now protected.
    RestoreAttacked { per_node: f64 },
    /// Multiply the effectiveness of earlier deployed defenses of the same
    /// category, capped at 1.0.
    Reinforce { multiplier: f64 },
}

/// A defense the defender can deploy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefenseDefinition {
    pub id: MoveId,
    pub name: String,
    /// Defense category tag.
    #[serde(rename = "type")]
    pub defense_type: String,
    pub cost: u32,
    pub security_boost: f64,
    /// Protection tags this defense covers.
    pub coverage: OrdSet<String>,
    /// Attack type tag -> effectiveness in [0, 1].
    pub effectiveness: OrdMap<String, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<SecondaryEffect>,
}

impl DefenseDefinition {
    /// Create a defense with empty coverage and effectiveness.
    #[must_use]
    pub fn new(
        id: impl Into<MoveId>,
        name: impl Into<String>,
        defense_type: impl Into<String>,
        cost: u32,
        security_boost: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            defense_type: defense_type.into(),
            cost,
            security_boost,
            coverage: OrdSet::new(),
            effectiveness: OrdMap::new(),
            secondary: None,
        }
    }

    /// Add coverage tags (builder pattern).
    #[must_use]
    pub fn covering<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.coverage.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set effectiveness against an attack type (builder pattern).
    #[must_use]
    pub fn effective_against(mut self, attack_type: impl Into<String>, value: f64) -> Self {
        self.effectiveness.insert(attack_type.into(), value);
        self
    }

    /// Attach a secondary effect (builder pattern).
    #[must_use]
    pub fn with_secondary(mut self, effect: SecondaryEffect) -> Self {
        self.secondary = Some(effect);
        self
    }

    /// Effectiveness against an attack type (0 when unlisted).
    #[must_use]
    pub fn effectiveness_against(&self, attack_type: &str) -> f64 {
        self.effectiveness.get(attack_type).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defense_builder() {
        let firewall = DefenseDefinition::new("firewall", "Firewall", "network", 3, 0.5)
            .covering(["network"])
            .effective_against("network", 0.8)
            .with_secondary(SecondaryEffect::Reinforce { multiplier: 1.1 });

        assert!(firewall.coverage.contains("network"));
        assert_eq!(firewall.effectiveness_against("network"), 0.8);
        assert_eq!(firewall.effectiveness_against("social"), 0.0);
        assert_eq!(firewall.secondary, Some(SecondaryEffect::Reinforce { multiplier: 1.1 }));
    }

    #[test]
    fn test_attack_json_uses_type_key() {
        let dos = AttackDefinition::new("dos", "DDoS Attack", "network", 3, 0.7);
        let json = serde_json::to_value(&dos).unwrap();
        assert_eq!(json["type"], "network");

        let back: AttackDefinition = serde_json::from_value(json).unwrap();
        assert_eq!(back, dos);
    }

    #[test]
    fn test_secondary_json() {
        let effect: SecondaryEffect =
            serde_json::from_str(r#"{"effect":"restore_attacked","per_node":0.5}"#).unwrap();
        assert_eq!(effect, SecondaryEffect::RestoreAttacked { per_node: 0.5 });
    }
}
