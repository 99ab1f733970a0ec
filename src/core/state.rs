//! Game state: network, players, deployed defenses.
//!
//! Uses `im` persistent data structures so that cloning a state is O(1).
//! The minimax search clones the state once per simulated move; every
//! branch then owns its nodes, resources and defenses outright and a
//! mutation in one branch is never visible to a sibling.

use im::{OrdMap, OrdSet, Vector};
use serde::{Deserialize, Serialize};

use super::action::MoveId;
use super::config::GameConfig;
use super::network::NetworkNode;
use super::side::{Side, SideMap};

/// Per-player state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Spendable resources.
    pub resources: u32,

    /// Ids of the moves this player may make.
    pub available: OrdSet<MoveId>,

    /// Every move made so far, oldest first.
    pub history: Vector<MoveId>,

    /// The most recent move.
    pub last_move: Option<MoveId>,
}

impl PlayerState {
    /// Create a player with no history.
    #[must_use]
    pub fn new(resources: u32, available: impl IntoIterator<Item = MoveId>) -> Self {
        Self {
            resources,
            available: available.into_iter().collect(),
            history: Vector::new(),
            last_move: None,
        }
    }

    /// Whether `id` is in this player's available set.
    #[must_use]
    pub fn has_available(&self, id: &MoveId) -> bool {
        self.available.contains(id)
    }

    /// The last `n` moves, oldest first.
    pub fn recent_moves(&self, n: usize) -> impl Iterator<Item = &MoveId> {
        let skip = self.history.len().saturating_sub(n);
        self.history.iter().skip(skip)
    }
}

/// A defense as deployed in one game.
///
/// Holds its own copy of the catalog effectiveness values so that
/// reinforcement effects only ever touch this game's copy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeployedDefense {
    /// Catalog id.
    pub id: MoveId,

    /// Defense category tag.
    pub defense_type: String,

    /// Attack type tag -> effectiveness in [0, 1].
    pub effectiveness: OrdMap<String, f64>,

    /// Turn on which it was deployed.
    pub turn: u32,
}

impl DeployedDefense {
    /// Effectiveness against an attack type (0 when unlisted).
    #[must_use]
    pub fn effectiveness_against(&self, attack_type: &str) -> f64 {
        self.effectiveness.get(attack_type).copied().unwrap_or(0.0)
    }
}

/// Network-wide state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkState {
    /// Overall security, always within the configured range.
    pub security_level: f64,

    /// Nodes in topology order.
    pub nodes: Vector<NetworkNode>,
}

impl NetworkState {
    /// Critical nodes.
    pub fn critical_nodes(&self) -> impl Iterator<Item = &NetworkNode> {
        self.nodes.iter().filter(|n| n.is_critical())
    }

    /// Unprotected nodes exposed to `attack_type`.
    pub fn targets_for<'a>(&'a self, attack_type: &'a str) -> impl Iterator<Item = &'a NetworkNode> {
        self.nodes.iter().filter(move |n| n.is_target_for(attack_type))
    }
}

/// Complete game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Ply counter (starts at 1).
    pub turn: u32,

    /// Side to move.
    pub current_player: Side,

    /// Network topology and security.
    pub network: NetworkState,

    /// Attacker and defender.
    pub players: SideMap<PlayerState>,

    /// Defenses deployed so far, oldest first.
    pub deployed: Vector<DeployedDefense>,

    /// Boosted catalog effectiveness values, populated only in legacy mode.
    #[serde(default)]
    pub catalog_overrides: OrdMap<MoveId, OrdMap<String, f64>>,

    /// Set once a winner is decided.
    pub game_over: bool,

    /// The winner, present exactly when `game_over` is set.
    pub winner: Option<Side>,
}

impl GameState {
    /// Create the opening state: full security, attacker to move on turn 1.
    #[must_use]
    pub fn new(
        config: &GameConfig,
        nodes: impl IntoIterator<Item = NetworkNode>,
        attacks: impl IntoIterator<Item = MoveId>,
        defenses: impl IntoIterator<Item = MoveId>,
    ) -> Self {
        Self {
            turn: 1,
            current_player: Side::Attacker,
            network: NetworkState {
                security_level: config.max_security,
                nodes: nodes.into_iter().collect(),
            },
            players: SideMap::new(|side| PlayerState::new(config.initial_resources(side), [])),
            deployed: Vector::new(),
            catalog_overrides: OrdMap::new(),
            game_over: false,
            winner: None,
        }
        .with_available(Side::Attacker, attacks)
        .with_available(Side::Defender, defenses)
    }

    /// Replace a side's available move set (builder pattern).
    #[must_use]
    pub fn with_available(mut self, side: Side, ids: impl IntoIterator<Item = MoveId>) -> Self {
        self.players[side].available = ids.into_iter().collect();
        self
    }

    /// Set the security level (builder pattern, for setting up positions).
    #[must_use]
    pub fn with_security(mut self, level: f64) -> Self {
        self.network.security_level = level;
        self
    }

    /// Set a side's resources (builder pattern, for setting up positions).
    #[must_use]
    pub fn with_resources(mut self, side: Side, resources: u32) -> Self {
        self.players[side].resources = resources;
        self
    }

    /// The attacker.
    #[must_use]
    pub fn attacker(&self) -> &PlayerState {
        &self.players[Side::Attacker]
    }

    /// The defender.
    #[must_use]
    pub fn defender(&self) -> &PlayerState {
        &self.players[Side::Defender]
    }

    /// A side's state.
    #[must_use]
    pub fn player(&self, side: Side) -> &PlayerState {
        &self.players[side]
    }

    /// Security level.
    #[must_use]
    pub fn security(&self) -> f64 {
        self.network.security_level
    }

    /// Mark the game as won.
    pub fn finish(&mut self, winner: Side) {
        self.game_over = true;
        self.winner = Some(winner);
    }

    /// Number of deployed defenses of a category.
    #[must_use]
    pub fn deployed_of_type(&self, defense_type: &str) -> usize {
        self.deployed.iter().filter(|d| d.defense_type == defense_type).count()
    }

    /// Best effectiveness of any deployed defense against an attack type.
    #[must_use]
    pub fn best_effectiveness_against(&self, attack_type: &str) -> f64 {
        self.deployed
            .iter()
            .map(|d| d.effectiveness_against(attack_type))
            .fold(0.0, f64::max)
    }
}
