//! Static evaluation of a position from the defender's point of view.
//!
//! Higher is better for the defender. Finished games score `+inf` for a
//! defender win and `-inf` for an attacker win.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::catalog::Catalog;
use crate::core::{GameConfig, GameState, Side};

/// How many recent attacker moves the coverage terms look at.
pub const RECENT_ATTACKS: usize = 3;

const SECURITY_WEIGHT: f64 = 40.0;
const RESOURCE_WEIGHT: f64 = 0.5;
const RESOURCE_CAP: f64 = 20.0;
const CRITICAL_WEIGHT: f64 = 20.0;
const COVERAGE_WEIGHT: f64 = 5.0;
const COVERAGE_CAP: f64 = 20.0;
const VARIETY_WEIGHT: f64 = 2.0;
const EXPOSURE_WEIGHT: f64 = 10.0;

/// Per-term breakdown of a non-terminal evaluation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub security: f64,
    pub resources: f64,
    pub critical: f64,
    pub coverage: f64,
    pub variety: f64,
    /// Zero or negative.
    pub exposure: f64,
}

impl Evaluation {
    /// Sum of all terms.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.security + self.resources + self.critical + self.coverage + self.variety + self.exposure
    }
}

/// Type tags of the attacker's last `RECENT_ATTACKS` moves, oldest first.
///
/// Ids missing from the catalog are skipped.
pub fn recent_attack_types<'a>(state: &GameState, catalog: &'a Catalog) -> SmallVec<[&'a str; RECENT_ATTACKS]> {
    state
        .attacker()
        .recent_moves(RECENT_ATTACKS)
        .filter_map(|id| catalog.attack_type(id.as_str()))
        .collect()
}

/// Score a position.
#[must_use]
pub fn evaluate(state: &GameState, catalog: &Catalog, config: &GameConfig) -> f64 {
    if state.game_over {
        return match state.winner {
            Some(Side::Defender) => f64::INFINITY,
            Some(Side::Attacker) => f64::NEG_INFINITY,
            None => 0.0,
        };
    }
    breakdown(state, catalog, config).total()
}

/// Term-by-term evaluation, ignoring whether the game is over.
#[must_use]
pub fn breakdown(state: &GameState, catalog: &Catalog, config: &GameConfig) -> Evaluation {
    let network = &state.network;
    let range = config.max_security - config.min_security;
    let security = (network.security_level - config.min_security) / range * SECURITY_WEIGHT;

    let differential = i64::from(state.defender().resources) - i64::from(state.attacker().resources);
    let resources = (differential as f64 * RESOURCE_WEIGHT).min(RESOURCE_CAP);

    let (total, protected) = network
        .critical_nodes()
        .fold((0usize, 0usize), |(t, p), n| (t + 1, p + usize::from(n.protected)));
    let critical = if total == 0 {
        0.0
    } else {
        protected as f64 / total as f64 * CRITICAL_WEIGHT
    };

    let recent = recent_attack_types(state, catalog);
    let covered: f64 = state
        .deployed
        .iter()
        .flat_map(|d| recent.iter().map(move |t| d.effectiveness_against(t)))
        .sum();
    let coverage = (COVERAGE_WEIGHT * covered).min(COVERAGE_CAP);

    let mut types: SmallVec<[&str; 8]> = state.deployed.iter().map(|d| d.defense_type.as_str()).collect();
    types.sort_unstable();
    types.dedup();
    let variety = VARIETY_WEIGHT * types.len() as f64;

    let exposure = state
        .attacker()
        .last_move
        .as_ref()
        .and_then(|id| catalog.attack_type(id.as_str()))
        .map_or(0.0, |t| -EXPOSURE_WEIGHT * (1.0 - state.best_effectiveness_against(t)));

    Evaluation {
        security,
        resources,
        critical,
        coverage,
        variety,
        exposure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::standard_catalog;
    use crate::core::{standard_topology, DeployedDefense, MoveId};

    fn opening() -> GameState {
        GameState::new(&GameConfig::default(), standard_topology(), [], [])
    }

    #[test]
    fn test_opening_position() {
        let catalog = standard_catalog();
        let eval = breakdown(&opening(), &catalog, &GameConfig::default());

        assert_eq!(eval.security, 40.0);
        assert_eq!(eval.resources, -2.5);
        assert_eq!(eval.critical, 0.0);
        assert_eq!(eval.coverage, 0.0);
        assert_eq!(eval.variety, 0.0);
        assert_eq!(eval.exposure, 0.0);
        assert_eq!(evaluate(&opening(), &catalog, &GameConfig::default()), 37.5);
    }

    #[test]
    fn test_coverage_and_exposure() {
        let catalog = standard_catalog();
        let mut state = opening()
            .with_security(9.0)
            .with_resources(Side::Attacker, 17)
            .with_resources(Side::Defender, 12);
        state.players[Side::Attacker].history.push_back(MoveId::new("dos"));
        state.players[Side::Attacker].last_move = Some(MoveId::new("dos"));
        state.deployed.push_back(DeployedDefense {
            id: MoveId::new("firewall"),
            defense_type: "network".into(),
            effectiveness: catalog.defense("firewall").unwrap().effectiveness.clone(),
            turn: 2,
        });

        let eval = breakdown(&state, &catalog, &GameConfig::default());

        assert!((eval.security - 36.0).abs() < 1e-9);
        assert!((eval.coverage - 4.0).abs() < 1e-9);
        assert_eq!(eval.variety, 2.0);
        assert!((eval.exposure + 2.0).abs() < 1e-9);
        assert!((eval.total() - 37.5).abs() < 1e-9);
    }

    #[test]
    fn test_resource_differential_capped() {
        let catalog = standard_catalog();
        let state = opening()
            .with_resources(Side::Attacker, 0)
            .with_resources(Side::Defender, 100);

        let eval = breakdown(&state, &catalog, &GameConfig::default());
        assert_eq!(eval.resources, 20.0);
    }

    #[test]
    fn test_critical_ratio() {
        let catalog = standard_catalog();
        let mut state = opening();
        state.network.nodes[1].protected = true;

        let eval = breakdown(&state, &catalog, &GameConfig::default());
        assert_eq!(eval.critical, 20.0);
    }

    #[test]
    fn test_terminal_scores() {
        let catalog = standard_catalog();
        let config = GameConfig::default();

        let mut won = opening();
        won.finish(Side::Defender);
        assert_eq!(evaluate(&won, &catalog, &config), f64::INFINITY);

        let mut lost = opening();
        lost.finish(Side::Attacker);
        assert_eq!(evaluate(&lost, &catalog, &config), f64::NEG_INFINITY);
    }

    #[test]
    fn test_recent_attack_types() {
        let catalog = standard_catalog();
        let mut state = opening();
        for id in ["dos", "sql", "unknown", "phishing", "brute"] {
            state.players[Side::Attacker].history.push_back(MoveId::new(id));
        }

        let types = recent_attack_types(&state, &catalog);
        assert_eq!(types.as_slice(), &["social", "authentication"]);
    }
}
