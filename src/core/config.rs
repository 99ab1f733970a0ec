//! Game configuration.
//!
//! All tunable constants of the wargame live in `GameConfig`. Collaborators
//! build one with `GameConfig::default()` and the `with_*` builders, or
//! deserialize it from JSON.

use serde::{Deserialize, Serialize};

use super::side::Side;

/// Game rule constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Lowest possible security level. Reaching it loses the game for the defender.
    pub min_security: f64,

    /// Highest possible security level. Games start here.
    pub max_security: f64,

    /// Security multiplier applied once per critical node struck by an attack.
    pub critical_node_penalty: f64,

    /// Security lost at the end of every ply.
    pub decay_per_ply: f64,

    /// Attacker resources at game start.
    pub attacker_initial_resources: u32,

    /// Defender resources at game start.
    pub defender_initial_resources: u32,

    /// Resources granted to the attacker when its turn begins.
    pub attacker_stipend: u32,

    /// Resources granted to the defender when its turn begins.
    pub defender_stipend: u32,

    /// Security level the defender must hold to win (and the odds override threshold).
    pub defender_win_security: f64,

    /// The defender cannot win before the turn counter exceeds this.
    pub defender_win_min_turn: u32,

    /// Security level above which momentum favours the defender.
    pub momentum_midpoint: f64,

    /// Reproduce the old behaviour where reinforcing a defense leaks the
    /// boosted effectiveness into every later deployment of that defense.
    pub legacy_catalog_boost: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_security: 0.0,
            max_security: 10.0,
            critical_node_penalty: 0.8,
            decay_per_ply: 0.1,
            attacker_initial_resources: 20,
            defender_initial_resources: 15,
            attacker_stipend: 2,
            defender_stipend: 3,
            defender_win_security: 8.0,
            defender_win_min_turn: 10,
            momentum_midpoint: 5.0,
            legacy_catalog_boost: false,
        }
    }
}

impl GameConfig {
    /// Set the security range.
    #[must_use]
    pub fn with_security_range(mut self, min: f64, max: f64) -> Self {
        assert!(min < max, "min_security must be below max_security");
        self.min_security = min;
        self.max_security = max;
        self
    }

    /// Set the per-ply decay.
    #[must_use]
    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay_per_ply = decay;
        self
    }

    /// Set the starting resources of both sides.
    #[must_use]
    pub fn with_initial_resources(mut self, attacker: u32, defender: u32) -> Self {
        self.attacker_initial_resources = attacker;
        self.defender_initial_resources = defender;
        self
    }

    /// Set the per-turn stipends of both sides.
    #[must_use]
    pub fn with_stipends(mut self, attacker: u32, defender: u32) -> Self {
        self.attacker_stipend = attacker;
        self.defender_stipend = defender;
        self
    }

    /// Set the defender victory thresholds.
    #[must_use]
    pub fn with_defender_win(mut self, security: f64, min_turn: u32) -> Self {
        self.defender_win_security = security;
        self.defender_win_min_turn = min_turn;
        self
    }

    /// Enable or disable the legacy catalog boost behaviour.
    #[must_use]
    pub fn with_legacy_catalog_boost(mut self, enabled: bool) -> Self {
        self.legacy_catalog_boost = enabled;
        self
    }

    /// Starting resources of a side.
    #[must_use]
    pub fn initial_resources(&self, side: Side) -> u32 {
        match side {
            Side::Attacker => self.attacker_initial_resources,
            Side::Defender => self.defender_initial_resources,
        }
    }

    /// Per-turn stipend of a side.
    #[must_use]
    pub fn stipend(&self, side: Side) -> u32 {
        match side {
            Side::Attacker => self.attacker_stipend,
            Side::Defender => self.defender_stipend,
        }
    }

    /// Clamp a security value into the configured range.
    #[must_use]
    pub fn clamp_security(&self, value: f64) -> f64 {
        value.clamp(self.min_security, self.max_security)
    }
}
