//! Catalog of attack and defense definitions.
//!
//! Lookup is by id through an `FxHashMap` index; iteration follows
//! registration order so move enumeration (and therefore search tie-breaks)
//! is deterministic.

use rustc_hash::FxHashMap;

use super::definition::{AttackDefinition, DefenseDefinition};
use crate::core::MoveId;

/// Immutable-by-convention move catalog, shared between games via `Arc`.
///
/// ```
/// use netwar::catalog::{AttackDefinition, Catalog};
///
/// let mut catalog = Catalog::new();
/// catalog.register_attack(AttackDefinition::new("dos", "DDoS Attack", "network", 3, 0.7));
///
/// assert_eq!(catalog.attack("dos").unwrap().cost, 3);
/// assert!(catalog.defense("dos").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    attacks: Vec<AttackDefinition>,
    defenses: Vec<DefenseDefinition>,
    attack_index: FxHashMap<MoveId, usize>,
    defense_index: FxHashMap<MoveId, usize>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an attack.
    ///
    /// Panics if an attack with the same id already exists.
    pub fn register_attack(&mut self, attack: AttackDefinition) {
        if self.attack_index.contains_key(&attack.id) {
            panic!("Attack {} already registered", attack.id);
        }
        self.attack_index.insert(attack.id.clone(), self.attacks.len());
        self.attacks.push(attack);
    }

    /// Register a defense.
    ///
    /// Panics if a defense with the same id already exists.
    pub fn register_defense(&mut self, defense: DefenseDefinition) {
        if self.defense_index.contains_key(&defense.id) {
            panic!("Defense {} already registered", defense.id);
        }
        self.defense_index.insert(defense.id.clone(), self.defenses.len());
        self.defenses.push(defense);
    }

    /// Add an attack (builder pattern).
    #[must_use]
    pub fn with_attack(mut self, attack: AttackDefinition) -> Self {
        self.register_attack(attack);
        self
    }

    /// Add a defense (builder pattern).
    #[must_use]
    pub fn with_defense(mut self, defense: DefenseDefinition) -> Self {
        self.register_defense(defense);
        self
    }

    /// Look up an attack.
    #[must_use]
    pub fn attack(&self, id: &str) -> Option<&AttackDefinition> {
        self.attack_index.get(id).map(|&i| &self.attacks[i])
    }

    /// Look up a defense.
    #[must_use]
    pub fn defense(&self, id: &str) -> Option<&DefenseDefinition> {
        self.defense_index.get(id).map(|&i| &self.defenses[i])
    }

    /// Whether an attack id is registered.
    #[must_use]
    pub fn contains_attack(&self, id: &str) -> bool {
        self.attack_index.contains_key(id)
    }

    /// Whether a defense id is registered.
    #[must_use]
    pub fn contains_defense(&self, id: &str) -> bool {
        self.defense_index.contains_key(id)
    }

    /// Attacks in registration order.
    pub fn attacks(&self) -> impl Iterator<Item = &AttackDefinition> {
        self.attacks.iter()
    }

    /// Defenses in registration order.
    pub fn defenses(&self) -> impl Iterator<Item = &DefenseDefinition> {
        self.defenses.iter()
    }

    /// Type tag of an attack, if registered.
    #[must_use]
    pub fn attack_type(&self, id: &str) -> Option<&str> {
        self.attack(id).map(|a| a.attack_type.as_str())
    }

    /// Number of attacks.
    #[must_use]
    pub fn attack_count(&self) -> usize {
        self.attacks.len()
    }

    /// Number of defenses.
    #[must_use]
    pub fn defense_count(&self) -> usize {
        self.defenses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new()
            .with_attack(AttackDefinition::new("dos", "DDoS", "network", 3, 0.7))
            .with_attack(AttackDefinition::new("sql", "SQLi", "application", 4, 0.6))
            .with_defense(DefenseDefinition::new("firewall", "Firewall", "network", 3, 0.5))
    }

    #[test]
    fn test_lookup() {
        let catalog = sample();

        assert_eq!(catalog.attack("sql").map(|a| a.cost), Some(4));
        assert!(catalog.attack("firewall").is_none());
        assert!(catalog.contains_defense("firewall"));
        assert_eq!(catalog.attack_type("dos"), Some("network"));
        assert_eq!(catalog.attack_type("nope"), None);
    }

    #[test]
    fn test_registration_order() {
        let catalog = sample();
        let ids: Vec<_> = catalog.attacks().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["dos", "sql"]);
        assert_eq!(catalog.attack_count(), 2);
        assert_eq!(catalog.defense_count(), 1);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_attack_panics() {
        let _ = sample().with_attack(AttackDefinition::new("dos", "Again", "network", 1, 0.1));
    }

    #[test]
    fn test_same_id_in_both_catalogs_is_allowed() {
        let catalog = sample().with_defense(DefenseDefinition::new("dos", "Scrubbing", "network", 2, 0.2));
        assert!(catalog.contains_attack("dos"));
        assert!(catalog.contains_defense("dos"));
    }
}
