//! JSON catalog loading.
//!
//! Catalog files are supplied by the collaborator layer. A missing numeric
//! field is not fatal: it reads as 0 and is reported as a `DataIntegrity`
//! issue alongside the loaded catalog. Rates and effectiveness values
//! outside `[0, 1]` and negative security boosts are clamped and reported
//! the same way.

use im::{OrdMap, OrdSet};
use serde::Deserialize;
use tracing::warn;

use super::definition::{AttackDefinition, DefenseDefinition, SecondaryEffect};
use super::registry::Catalog;
use crate::core::MoveId;
use crate::error::{CatalogError, DataIntegrity, IntegrityProblem};

/// A loaded catalog plus any data-integrity issues found on the way.
#[derive(Debug)]
pub struct LoadReport {
    pub catalog: Catalog,
    pub issues: Vec<DataIntegrity>,
}

#[derive(Deserialize)]
struct RawCatalog {
    #[serde(default)]
    attacks: Vec<RawAttack>,
    #[serde(default)]
    defenses: Vec<RawDefense>,
}

#[derive(Deserialize)]
struct RawAttack {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    attack_type: String,
    cost: Option<u32>,
    #[serde(alias = "successRate")]
    success_rate: Option<f64>,
}

#[derive(Deserialize)]
struct RawDefense {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    defense_type: String,
    cost: Option<u32>,
    #[serde(alias = "securityBoost")]
    security_boost: Option<f64>,
    #[serde(default)]
    coverage: OrdSet<String>,
    #[serde(default)]
    effectiveness: OrdMap<String, f64>,
    #[serde(default)]
    secondary: Option<SecondaryEffect>,
}

/// Parse a catalog from JSON of the form `{"attacks": [...], "defenses": [...]}`.
pub fn load_catalog(json: &str) -> Result<LoadReport, CatalogError> {
    let raw: RawCatalog = serde_json::from_str(json)?;
    let mut catalog = Catalog::new();
    let mut issues = Vec::new();

    for (index, attack) in raw.attacks.into_iter().enumerate() {
        if attack.id.is_empty() {
            return Err(CatalogError::EmptyId(index));
        }
        let id = MoveId::new(attack.id);
        if catalog.contains_attack(id.as_str()) {
            return Err(CatalogError::DuplicateId(id));
        }
        let cost = numeric(attack.cost, &id, "cost", &mut issues);
        let success_rate = numeric(attack.success_rate, &id, "success_rate", &mut issues);
        let success_rate = bounded(success_rate, 0.0, 1.0, &id, "success_rate", &mut issues);
        catalog.register_attack(AttackDefinition {
            name: name_or_id(attack.name, &id),
            id,
            attack_type: attack.attack_type,
            cost,
            success_rate,
        });
    }

    for (index, defense) in raw.defenses.into_iter().enumerate() {
        if defense.id.is_empty() {
            return Err(CatalogError::EmptyId(index));
        }
        let id = MoveId::new(defense.id);
        if catalog.contains_defense(id.as_str()) {
            return Err(CatalogError::DuplicateId(id));
        }
        let cost = numeric(defense.cost, &id, "cost", &mut issues);
        let security_boost = numeric(defense.security_boost, &id, "security_boost", &mut issues);
        let security_boost = bounded(security_boost, 0.0, f64::INFINITY, &id, "security_boost", &mut issues);
        let mut effectiveness = defense.effectiveness;
        if effectiveness.values().any(|v| !(0.0..=1.0).contains(v)) {
            report(&id, "effectiveness", IntegrityProblem::OutOfRange, &mut issues);
            effectiveness = effectiveness
                .into_iter()
                .map(|(attack_type, value)| (attack_type, value.clamp(0.0, 1.0)))
                .collect();
        }
        catalog.register_defense(DefenseDefinition {
            name: name_or_id(defense.name, &id),
            id,
            defense_type: defense.defense_type,
            cost,
            security_boost,
            coverage: defense.coverage,
            effectiveness,
            secondary: defense.secondary,
        });
    }

    Ok(LoadReport { catalog, issues })
}

fn numeric<T: Default>(
    value: Option<T>,
    entry: &MoveId,
    field: &'static str,
    issues: &mut Vec<DataIntegrity>,
) -> T {
    value.unwrap_or_else(|| {
        report(entry, field, IntegrityProblem::Missing, issues);
        T::default()
    })
}

fn bounded(
    value: f64,
    min: f64,
    max: f64,
    entry: &MoveId,
    field: &'static str,
    issues: &mut Vec<DataIntegrity>,
) -> f64 {
    if (min..=max).contains(&value) {
        return value;
    }
    report(entry, field, IntegrityProblem::OutOfRange, issues);
    value.clamp(min, max)
}

fn report(entry: &MoveId, field: &'static str, problem: IntegrityProblem, issues: &mut Vec<DataIntegrity>) {
    let issue = DataIntegrity {
        entry: entry.clone(),
        field,
        problem,
    };
    warn!("{issue}");
    issues.push(issue);
}

fn name_or_id(name: String, id: &MoveId) -> String {
    if name.is_empty() {
        id.to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_complete_catalog() {
        let json = r#"{
            "attacks": [
                {"id": "dos", "name": "DDoS Attack", "type": "network", "cost": 3, "success_rate": 0.7}
            ],
            "defenses": [
                {"id": "firewall", "name": "Firewall", "type": "network", "cost": 3,
                 "security_boost": 0.5, "coverage": ["network"], "effectiveness": {"network": 0.8}}
            ]
        }"#;

        let report = load_catalog(json).unwrap();
        assert!(report.issues.is_empty());
        assert_eq!(report.catalog.attack("dos").map(|a| a.success_rate), Some(0.7));
        assert_eq!(
            report.catalog.defense("firewall").map(|d| d.effectiveness_against("network")),
            Some(0.8)
        );
    }

    #[test]
    fn test_missing_numeric_fields_read_as_zero() {
        let json = r#"{
            "attacks": [{"id": "probe", "type": "network"}],
            "defenses": [{"id": "honeypot", "type": "network", "cost": 2}]
        }"#;

        let report = load_catalog(json).unwrap();
        let probe = report.catalog.attack("probe").unwrap();
        assert_eq!(probe.cost, 0);
        assert_eq!(probe.success_rate, 0.0);
        assert_eq!(probe.name, "probe");

        let fields: Vec<_> = report.issues.iter().map(|i| (i.entry.as_str(), i.field)).collect();
        assert_eq!(
            fields,
            vec![("probe", "cost"), ("probe", "success_rate"), ("honeypot", "security_boost")]
        );
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let json = r#"{
            "attacks": [{"id": "nuke", "type": "network", "cost": 1, "success_rate": 7.5}],
            "defenses": [{"id": "drain", "type": "network", "cost": 1, "security_boost": -20.0,
                          "coverage": ["network"], "effectiveness": {"network": 3.0, "social": 0.5}}]
        }"#;

        let report = load_catalog(json).unwrap();
        assert_eq!(report.catalog.attack("nuke").map(|a| a.success_rate), Some(1.0));
        let drain = report.catalog.defense("drain").unwrap();
        assert_eq!(drain.security_boost, 0.0);
        assert_eq!(drain.effectiveness_against("network"), 1.0);
        assert_eq!(drain.effectiveness_against("social"), 0.5);

        let fields: Vec<_> = report.issues.iter().map(|i| (i.entry.as_str(), i.field, i.problem)).collect();
        assert_eq!(
            fields,
            vec![
                ("nuke", "success_rate", IntegrityProblem::OutOfRange),
                ("drain", "security_boost", IntegrityProblem::OutOfRange),
                ("drain", "effectiveness", IntegrityProblem::OutOfRange),
            ]
        );
    }

    #[test]
    fn test_camel_case_aliases() {
        let json = r#"{"attacks": [{"id": "sql", "type": "application", "cost": 4, "successRate": 0.6}]}"#;
        let report = load_catalog(json).unwrap();
        assert_eq!(report.catalog.attack("sql").map(|a| a.success_rate), Some(0.6));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let json = r#"{"attacks": [
            {"id": "dos", "type": "network", "cost": 3, "success_rate": 0.7},
            {"id": "dos", "type": "network", "cost": 1, "success_rate": 0.1}
        ]}"#;
        assert!(matches!(load_catalog(json), Err(CatalogError::DuplicateId(id)) if id.as_str() == "dos"));
    }

    #[test]
    fn test_empty_id_rejected() {
        let json = r#"{"defenses": [{"id": "", "type": "network"}]}"#;
        assert!(matches!(load_catalog(json), Err(CatalogError::EmptyId(0))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(load_catalog("{not json"), Err(CatalogError::Json(_))));
    }
}
