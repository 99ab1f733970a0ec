//! Heuristic win-probability estimate.
//!
//! Five signals each award a fixed weight between the two sides; the
//! awards are normalized to percentages and then a few decisive
//! situations override the blend with a floor for one side.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::core::{GameConfig, GameState, Side};
use crate::ai::eval::recent_attack_types;
use crate::predict::Confidence;

const SECURITY_WEIGHT: f64 = 35.0;
const RESOURCE_WEIGHT: f64 = 25.0;
const CRITICAL_WEIGHT: f64 = 20.0;
const COVERAGE_WEIGHT: f64 = 10.0;
const MOMENTUM_WEIGHT: f64 = 10.0;
const MOMENTUM_FAVOURED: f64 = 0.7;

/// Override thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OddsConfig {
    /// At or below this security the attacker is all but certain to win.
    pub collapse_security: f64,
    /// Attacker floor when security has collapsed.
    pub collapse_floor: f64,
    /// Defender floor once security reaches the defender win threshold.
    pub secure_floor: f64,
    /// At or below this security a well-funded attacker is favoured.
    pub pressure_security: f64,
    /// Attacker resources needed for the pressure override.
    pub pressure_resources: u32,
    /// Attacker floor under pressure.
    pub pressure_floor: f64,
}

impl Default for OddsConfig {
    fn default() -> Self {
        Self {
            collapse_security: 1.0,
            collapse_floor: 85.0,
            secure_floor: 80.0,
            pressure_security: 3.0,
            pressure_resources: 10,
            pressure_floor: 75.0,
        }
    }
}

/// Points awarded to each side by one signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorShare {
    pub attacker: f64,
    pub defender: f64,
}

impl FactorShare {
    fn split(weight: f64, defender_share: f64) -> Self {
        Self {
            attacker: weight * (1.0 - defender_share),
            defender: weight * defender_share,
        }
    }
}

/// Per-signal points before normalization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OddsBreakdown {
    pub security: FactorShare,
    pub resources: FactorShare,
    pub critical: FactorShare,
    pub coverage: FactorShare,
    pub momentum: FactorShare,
}

impl OddsBreakdown {
    fn totals(&self) -> (f64, f64) {
        [self.security, self.resources, self.critical, self.coverage, self.momentum]
            .iter()
            .fold((0.0, 0.0), |(a, d), s| (a + s.attacker, d + s.defender))
    }
}

/// Which override floors fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OddsOverride {
    SecurityCollapse,
    DefenderSecure,
    AttackerPressure,
}

/// Estimated odds, in percent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WinProbability {
    pub attacker: f64,
    pub defender: f64,
    pub breakdown: OddsBreakdown,
    pub overrides: Vec<OddsOverride>,
    /// Grows with the number of turns played.
    pub confidence: Confidence,
}

impl WinProbability {
    /// Percentage for one side.
    #[must_use]
    pub fn of(&self, side: Side) -> f64 {
        match side {
            Side::Attacker => self.attacker,
            Side::Defender => self.defender,
        }
    }

    /// Side currently favoured (the defender on an even split).
    #[must_use]
    pub fn favourite(&self) -> Side {
        if self.attacker > self.defender {
            Side::Attacker
        } else {
            Side::Defender
        }
    }

    fn floor(&mut self, side: Side, floor: f64) {
        let value = self.of(side).max(floor);
        match side {
            Side::Attacker => {
                self.attacker = value;
                self.defender = 100.0 - value;
            }
            Side::Defender => {
                self.defender = value;
                self.attacker = 100.0 - value;
            }
        }
    }
}

/// Stateless odds estimator.
#[derive(Clone, Debug, Default)]
pub struct WinProbabilityEstimator {
    config: OddsConfig,
}

impl WinProbabilityEstimator {
    #[must_use]
    pub fn new(config: OddsConfig) -> Self {
        Self { config }
    }

    /// Estimate both sides' chances of winning from `state`.
    #[must_use]
    pub fn estimate(&self, state: &GameState, catalog: &Catalog, game: &GameConfig) -> WinProbability {
        let confidence = turn_confidence(state.turn);

        if state.game_over {
            let (attacker, defender) = match state.winner {
                Some(Side::Attacker) => (100.0, 0.0),
                Some(Side::Defender) => (0.0, 100.0),
                None => (50.0, 50.0),
            };
            return WinProbability {
                attacker,
                defender,
                breakdown: OddsBreakdown::default(),
                overrides: Vec::new(),
                confidence,
            };
        }

        let breakdown = self.breakdown(state, catalog, game);
        let (a, d) = breakdown.totals();
        let total = a + d;
        let mut odds = WinProbability {
            attacker: if total > 0.0 { a / total * 100.0 } else { 50.0 },
            defender: if total > 0.0 { d / total * 100.0 } else { 50.0 },
            breakdown,
            overrides: Vec::new(),
            confidence,
        };

        let security = state.security();
        if security <= self.config.collapse_security {
            odds.floor(Side::Attacker, self.config.collapse_floor);
            odds.overrides.push(OddsOverride::SecurityCollapse);
        }
        if security >= game.defender_win_security {
            odds.floor(Side::Defender, self.config.secure_floor);
            odds.overrides.push(OddsOverride::DefenderSecure);
        }
        if state.attacker().resources >= self.config.pressure_resources && security <= self.config.pressure_security {
            odds.floor(Side::Attacker, self.config.pressure_floor);
            odds.overrides.push(OddsOverride::AttackerPressure);
        }

        odds
    }

    /// Points per signal for a position still in play.
    #[must_use]
    pub fn breakdown(&self, state: &GameState, catalog: &Catalog, game: &GameConfig) -> OddsBreakdown {
        let network = &state.network;

        let fraction = (network.security_level - game.min_security) / (game.max_security - game.min_security);
        let security = FactorShare::split(SECURITY_WEIGHT, fraction);

        let (att, def) = (u64::from(state.attacker().resources), u64::from(state.defender().resources));
        let pooled = att + def;
        let resources = if pooled == 0 {
            FactorShare::split(RESOURCE_WEIGHT, 0.5)
        } else {
            FactorShare::split(RESOURCE_WEIGHT, def as f64 / pooled as f64)
        };

        let (total, protected, attacked) = network.critical_nodes().fold((0usize, 0usize, 0usize), |(t, p, k), n| {
            (t + 1, p + usize::from(n.protected), k + usize::from(n.attacked))
        });
        let critical = if total == 0 {
            FactorShare::split(CRITICAL_WEIGHT, 0.5)
        } else {
            FactorShare {
                attacker: CRITICAL_WEIGHT * attacked as f64 / total as f64,
                defender: CRITICAL_WEIGHT * protected as f64 / total as f64,
            }
        };

        let recent = recent_attack_types(state, catalog);
        let effectiveness = if recent.is_empty() {
            0.0
        } else {
            recent.iter().map(|t| state.best_effectiveness_against(t)).sum::<f64>() / recent.len() as f64
        };
        let coverage = FactorShare {
            attacker: 0.0,
            defender: COVERAGE_WEIGHT * effectiveness,
        };

        let defender_momentum = if network.security_level > game.momentum_midpoint {
            MOMENTUM_FAVOURED
        } else {
            1.0 - MOMENTUM_FAVOURED
        };
        let momentum = FactorShare::split(MOMENTUM_WEIGHT, defender_momentum);

        OddsBreakdown {
            security,
            resources,
            critical,
            coverage,
            momentum,
        }
    }
}

/// Confidence label for the number of turns played.
#[must_use]
pub fn turn_confidence(turn: u32) -> Confidence {
    if turn > 5 {
        Confidence::High
    } else if turn > 2 {
        Confidence::Medium
    } else {
        Confidence::Low
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

    fn estimate(state: &GameState) -> WinProbability {
        WinProbabilityEstimator::default().estimate(state, &standard_catalog(), &GameConfig::default())
    }

    #[test]
    fn test_finished_game() {
        let mut state = opening();
        state.finish(Side::Attacker);

        let odds = estimate(&state);
        assert_eq!((odds.attacker, odds.defender), (100.0, 0.0));
        assert_eq!(odds.favourite(), Side::Attacker);
    }

    #[test]
    fn test_opening_breakdown() {
        let state = opening().with_security(7.0);
        let odds = estimate(&state);
        let b = odds.breakdown;

        assert!((b.security.defender - 24.5).abs() < 1e-9);
        assert!((b.security.attacker - 10.5).abs() < 1e-9);
        assert!((b.resources.attacker - 25.0 * 20.0 / 35.0).abs() < 1e-9);
        assert_eq!(b.critical, FactorShare::default());
        assert_eq!(b.coverage, FactorShare::default());
        assert!((b.momentum.defender - 7.0).abs() < 1e-9);
        assert!((odds.attacker + odds.defender - 100.0).abs() < 1e-9);
        assert!(odds.overrides.is_empty());
        assert_eq!(odds.confidence, Confidence::Low);
    }

    #[test]
    fn test_coverage_is_defender_only() {
        let mut state = opening().with_security(6.0);
        state.players[Side::Attacker].history.push_back(MoveId::new("dos"));
        state.players[Side::Attacker].history.push_back(MoveId::new("phishing"));
        state.deployed.push_back(DeployedDefense {
            id: MoveId::new("firewall"),
            defense_type: "network".into(),
            effectiveness: standard_catalog().defense("firewall").unwrap().effectiveness.clone(),
            turn: 2,
        });

        let b = estimate(&state).breakdown;
        assert_eq!(b.coverage.attacker, 0.0);
        // (0.8 + 0.0) / 2
        assert!((b.coverage.defender - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_collapse_override() {
        let state = opening().with_security(0.5);
        let odds = estimate(&state);

        assert!(odds.attacker >= 85.0);
        assert!((odds.attacker + odds.defender - 100.0).abs() < 1e-9);
        assert!(odds.overrides.contains(&OddsOverride::SecurityCollapse));
    }

    #[test]
    fn test_secure_override() {
        let state = opening().with_security(9.0);
        let odds = estimate(&state);

        assert!(odds.defender >= 80.0);
        assert_eq!(odds.overrides, vec![OddsOverride::DefenderSecure]);
    }

    #[test]
    fn test_pressure_override() {
        let state = opening().with_security(2.5).with_resources(Side::Attacker, 10);
        let odds = estimate(&state);

        assert!(odds.attacker >= 75.0);
        assert_eq!(odds.overrides, vec![OddsOverride::AttackerPressure]);

        let poor = opening().with_security(2.5).with_resources(Side::Attacker, 9);
        assert!(estimate(&poor).overrides.is_empty());
    }

    #[test]
    fn test_critical_signal() {
        let mut state = opening().with_security(6.0);
        state.network.nodes[1].protected = true;

        let b = estimate(&state).breakdown;
        assert_eq!(b.critical.defender, 20.0);
        assert_eq!(b.critical.attacker, 0.0);
    }

    #[test]
    fn test_resource_pool_does_not_overflow() {
        let state = opening()
            .with_security(6.0)
            .with_resources(Side::Attacker, u32::MAX)
            .with_resources(Side::Defender, u32::MAX);

        let b = estimate(&state).breakdown;
        assert!((b.resources.attacker - 12.5).abs() < 1e-9);
        assert!((b.resources.defender - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_turn_confidence() {
        assert_eq!(turn_confidence(1), Confidence::Low);
        assert_eq!(turn_confidence(3), Confidence::Medium);
        assert_eq!(turn_confidence(6), Confidence::High);
    }
}
