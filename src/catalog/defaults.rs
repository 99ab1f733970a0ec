//! The standard game content.
//!
//! Seven attack patterns, of which the attacker opens
//! with five (`mitm` and `zero_day` stay locked). Defenses pair
//! one category with each attack type plus two broader tools carrying
//! secondary effects.

use super::definition::{AttackDefinition, DefenseDefinition, SecondaryEffect};
use super::registry::Catalog;
use crate::core::MoveId;

/// Attacks unlocked at game start.
pub const OPENING_ATTACKS: [&str; 5] = ["dos", "sql", "phishing", "malware", "brute"];

/// The full standard catalog.
#[must_use]
pub fn standard_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    for attack in standard_attacks() {
        catalog.register_attack(attack);
    }
    for defense in standard_defenses() {
        catalog.register_defense(defense);
    }
    catalog
}

/// The seven standard attacks.
#[must_use]
pub fn standard_attacks() -> Vec<AttackDefinition> {
    vec![
        AttackDefinition::new("dos", "DDoS Attack", "network", 3, 0.7),
        AttackDefinition::new("sql", "SQL Injection", "application", 4, 0.6),
        AttackDefinition::new("phishing", "Phishing Campaign", "social", 2, 0.8),
        AttackDefinition::new("malware", "Malware Deploy", "system", 5, 0.5),
        AttackDefinition::new("mitm", "Man-in-Middle", "network", 6, 0.4),
        AttackDefinition::new("brute", "Brute Force", "authentication", 3, 0.6),
        AttackDefinition::new("zero_day", "Zero-Day Exploit", "system", 8, 0.9),
    ]
}

/// The standard defenses.
#[must_use]
pub fn standard_defenses() -> Vec<DefenseDefinition> {
    vec![
        DefenseDefinition::new("firewall", "Firewall", "network", 3, 0.5)
            .covering(["network"])
            .effective_against("network", 0.8)
            .effective_against("application", 0.2),
        DefenseDefinition::new("waf", "Web Application Firewall", "application", 4, 0.6)
            .covering(["application"])
            .effective_against("application", 0.8)
            .effective_against("network", 0.3),
        DefenseDefinition::new("training", "Security Awareness Training", "social", 2, 0.3)
            .covering(["social"])
            .effective_against("social", 0.7)
            .effective_against("authentication", 0.3)
            .with_secondary(SecondaryEffect::Reinforce { multiplier: 1.1 }),
        DefenseDefinition::new("endpoint", "Endpoint Protection", "system", 4, 0.5)
            .covering(["system"])
            .effective_against("system", 0.8),
        DefenseDefinition::new("mfa", "Multi-Factor Authentication", "authentication", 3, 0.4)
            .covering(["authentication"])
            .effective_against("authentication", 0.9)
            .effective_against("social", 0.4),
        DefenseDefinition::new("ids", "Intrusion Detection System", "network", 5, 0.7)
            .covering(["network", "system"])
            .effective_against("network", 0.6)
            .effective_against("system", 0.5)
            .effective_against("application", 0.4)
            .with_secondary(SecondaryEffect::Reinforce { multiplier: 1.2 }),
        DefenseDefinition::new("incident_response", "Incident Response Team", "response", 6, 0.8)
            .covering(["application", "system"])
            .effective_against("system", 0.5)
            .effective_against("application", 0.5)
            .effective_against("network", 0.3)
            .with_secondary(SecondaryEffect::RestoreAttacked { per_node: 0.5 }),
    ]
}

/// Ids of the attacks unlocked at game start.
#[must_use]
pub fn opening_attack_ids() -> Vec<MoveId> {
    OPENING_ATTACKS.iter().map(|&id| MoveId::new(id)).collect()
}
