//! Combat resolution: validate and apply one move, then run end-of-ply
//! housekeeping.
//!
//! `apply` is validate-then-mutate. Every check (game over, turn order,
//! catalog lookup, availability, cost) runs before the first write, so a
//! rejected move leaves the state untouched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{AttackDefinition, Catalog, DefenseDefinition, SecondaryEffect};
use crate::core::{DeployedDefense, GameConfig, GameState, Move, MoveId, NetworkNode, Side};
use crate::error::{GameError, InvalidMove};

/// Summary of a resolved attack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub id: MoveId,
    pub name: String,
    pub attack_type: String,
    pub cost: u32,
    /// Security removed before the critical-node penalty.
    pub damage: f64,
    /// At least one critical node was struck.
    pub critical_hit: bool,
    /// Names of the nodes struck.
    pub targets: Vec<String>,
    pub security_before: f64,
    /// Security after the attack, before end-of-ply decay.
    pub security_after: f64,
}

/// Summary of a resolved defense.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefenseOutcome {
    pub id: MoveId,
    pub name: String,
    pub defense_type: String,
    pub cost: u32,
    pub boost: f64,
    /// Names of the nodes now covered by this defense.
    pub protected: Vec<String>,
    /// Security restored by a restore effect.
    pub restored: f64,
    /// Number of earlier defenses reinforced.
    pub reinforced: usize,
    pub security_before: f64,
    /// Security after the defense, before end-of-ply decay.
    pub security_after: f64,
}

/// Move-resolution summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MoveOutcome {
    Attack(AttackOutcome),
    Defense(DefenseOutcome),
}

impl MoveOutcome {
    /// Catalog id of the move.
    #[must_use]
    pub fn id(&self) -> &MoveId {
        match self {
            MoveOutcome::Attack(a) => &a.id,
            MoveOutcome::Defense(d) => &d.id,
        }
    }
}

/// Applies moves to game states.
///
/// Holds the shared catalog and the rule constants; carries no per-game
/// state, so one resolver can drive any number of games and search branches.
#[derive(Clone, Debug)]
pub struct CombatResolver {
    catalog: Arc<Catalog>,
    config: GameConfig,
}

impl CombatResolver {
    /// Create a resolver.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, config: GameConfig) -> Self {
        Self { catalog, config }
    }

    /// The move catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared handle to the move catalog.
    #[must_use]
    pub fn catalog_handle(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// The rule constants.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Opening state over `nodes`: the attacker may use `attacks`, the
    /// defender every catalog defense.
    #[must_use]
    pub fn new_game(
        &self,
        nodes: impl IntoIterator<Item = NetworkNode>,
        attacks: impl IntoIterator<Item = MoveId>,
    ) -> GameState {
        let defenses = self.catalog.defenses().map(|d| d.id.clone());
        GameState::new(&self.config, nodes, attacks, defenses)
    }

    // === Legal moves ===

    /// Attacks the attacker can afford from its available set, in catalog order.
    pub fn legal_attacks<'a>(&'a self, state: &'a GameState) -> impl Iterator<Item = &'a AttackDefinition> {
        let attacker = state.attacker();
        self.catalog
            .attacks()
            .filter(move |a| attacker.has_available(&a.id) && a.cost <= attacker.resources)
    }

    /// Defenses the defender can afford from its available set, in catalog order.
    pub fn legal_defenses<'a>(&'a self, state: &'a GameState) -> impl Iterator<Item = &'a DefenseDefinition> {
        let defender = state.defender();
        self.catalog
            .defenses()
            .filter(move |d| defender.has_available(&d.id) && d.cost <= defender.resources)
    }

    /// Legal moves for a side (empty once the game is over).
    #[must_use]
    pub fn legal_moves(&self, state: &GameState, side: Side) -> Vec<Move> {
        if state.game_over {
            return Vec::new();
        }
        match side {
            Side::Attacker => self.legal_attacks(state).map(|a| Move::Attack(a.id.clone())).collect(),
            Side::Defender => self.legal_defenses(state).map(|d| Move::Defense(d.id.clone())).collect(),
        }
    }

    // === Application ===

    /// Validate and apply one move, then run end-of-ply housekeeping.
    pub fn apply(&self, state: &mut GameState, mv: &Move) -> Result<MoveOutcome, GameError> {
        match mv {
            Move::Attack(id) => self.attack(state, id).map(MoveOutcome::Attack),
            Move::Defense(id) => self.defend(state, id).map(MoveOutcome::Defense),
        }
    }

    /// Apply an attack for the attacker.
    pub fn attack(&self, state: &mut GameState, id: &MoveId) -> Result<AttackOutcome, GameError> {
        self.check_turn(state, Side::Attacker)?;
        let attack = self
            .catalog
            .attack(id.as_str())
            .ok_or_else(|| InvalidMove::UnknownMove(id.clone()))?;
        check_affordable(state, Side::Attacker, id, attack.cost)?;

        let outcome = self.resolve_attack(state, attack);
        self.finish_move(state, Side::Attacker, id);
        Ok(outcome)
    }

    /// Apply a defense for the defender.
    pub fn defend(&self, state: &mut GameState, id: &MoveId) -> Result<DefenseOutcome, GameError> {
        self.check_turn(state, Side::Defender)?;
        let defense = self
            .catalog
            .defense(id.as_str())
            .ok_or_else(|| InvalidMove::UnknownMove(id.clone()))?;
        check_affordable(state, Side::Defender, id, defense.cost)?;

        let outcome = self.resolve_defense(state, defense);
        self.finish_move(state, Side::Defender, id);
        Ok(outcome)
    }

    /// Pass the turn of a side that has no legal move.
    pub fn skip_turn(&self, state: &mut GameState) -> Result<(), GameError> {
        if state.game_over {
            return Err(GameError::GameAlreadyOver);
        }
        warn!(side = %state.current_player, turn = state.turn, "turn skipped");
        self.end_ply(state);
        Ok(())
    }

    fn check_turn(&self, state: &GameState, side: Side) -> Result<(), GameError> {
        if state.game_over {
            return Err(GameError::GameAlreadyOver);
        }
        if side != state.current_player {
            return Err(InvalidMove::OutOfTurn {
                attempted: side,
                current: state.current_player,
            }
            .into());
        }
        Ok(())
    }

    fn finish_move(&self, state: &mut GameState, side: Side, id: &MoveId) {
        let player = &mut state.players[side];
        player.history.push_back(id.clone());
        player.last_move = Some(id.clone());

        debug!(%side, move_id = %id, turn = state.turn, security = state.network.security_level, "move resolved");
        self.end_ply(state);
    }

    fn resolve_attack(&self, state: &mut GameState, attack: &AttackDefinition) -> AttackOutcome {
        let security_before = state.network.security_level;

        let targets: Vec<usize> = state
            .network
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_target_for(&attack.attack_type))
            .map(|(i, _)| i)
            .collect();

        let modifier = if targets.is_empty() {
            1.0
        } else {
            1.0 + 0.1 * targets.len() as f64
        };
        let damage = attack.success_rate * modifier;

        let mut security = (security_before - damage).max(self.config.min_security);
        state.players[Side::Attacker].resources -= attack.cost;

        let mut names = Vec::with_capacity(targets.len());
        let mut critical_hit = false;
        for &i in &targets {
            let node = &mut state.network.nodes[i];
            node.attacked = true;
            if node.is_critical() {
                // Compounds once per critical target
                security *= self.config.critical_node_penalty;
                critical_hit = true;
            }
            names.push(node.name.clone());
        }

        state.network.security_level = self.config.clamp_security(security);

        AttackOutcome {
            id: attack.id.clone(),
            name: attack.name.clone(),
            attack_type: attack.attack_type.clone(),
            cost: attack.cost,
            damage,
            critical_hit,
            targets: names,
            security_before,
            security_after: state.network.security_level,
        }
    }

    fn resolve_defense(&self, state: &mut GameState, defense: &DefenseDefinition) -> DefenseOutcome {
        let security_before = state.network.security_level;

        let mut protected = Vec::new();
        for node in state.network.nodes.iter_mut() {
            if node.is_covered_by(&defense.coverage) {
                node.protected = true;
                protected.push(node.name.clone());
            }
        }

        state.network.security_level = self.config.clamp_security(security_before + defense.security_boost);
        state.players[Side::Defender].resources -= defense.cost;

        let mut restored = 0.0;
        let mut reinforced = 0;
        match defense.secondary {
            Some(SecondaryEffect::RestoreAttacked { per_node }) => {
                let recovered = state
                    .network
                    .nodes
                    .iter()
                    .filter(|n| n.attacked && n.protected)
                    .count();
                let before = state.network.security_level;
                state.network.security_level =
                    (before + per_node * recovered as f64).min(self.config.max_security);
                restored = state.network.security_level - before;
            }
            Some(SecondaryEffect::Reinforce { multiplier }) => {
                reinforced = self.reinforce(state, &defense.defense_type, multiplier);
            }
            None => {}
        }

        let effectiveness = if self.config.legacy_catalog_boost {
            state
                .catalog_overrides
                .get(&defense.id)
                .cloned()
                .unwrap_or_else(|| defense.effectiveness.clone())
        } else {
            defense.effectiveness.clone()
        };

        state.deployed.push_back(DeployedDefense {
            id: defense.id.clone(),
            defense_type: defense.defense_type.clone(),
            effectiveness,
            turn: state.turn,
        });

        DefenseOutcome {
            id: defense.id.clone(),
            name: defense.name.clone(),
            defense_type: defense.defense_type.clone(),
            cost: defense.cost,
            boost: defense.security_boost,
            protected,
            restored,
            reinforced,
            security_before,
            security_after: state.network.security_level,
        }
    }

    /// Boost earlier deployed defenses of the same category. Only this
    /// game's copies change; legacy mode also records the boosted values
    /// for later deployments of the same defense.
    fn reinforce(&self, state: &mut GameState, defense_type: &str, multiplier: f64) -> usize {
        let mut count = 0;
        for deployed in state.deployed.iter_mut() {
            if deployed.defense_type != defense_type {
                continue;
            }
            deployed.effectiveness = deployed
                .effectiveness
                .iter()
                .map(|(attack_type, value)| (attack_type.clone(), (value * multiplier).min(1.0)))
                .collect();
            if self.config.legacy_catalog_boost {
                state
                    .catalog_overrides
                    .insert(deployed.id.clone(), deployed.effectiveness.clone());
            }
            count += 1;
        }
        count
    }

    /// Switch sides, advance the turn, decay security, pay the stipend and
    /// check for a winner.
    fn end_ply(&self, state: &mut GameState) {
        let next = state.current_player.opponent();
        state.current_player = next;
        state.turn += 1;
        state.network.security_level =
            (state.network.security_level - self.config.decay_per_ply).max(self.config.min_security);

        let player = &mut state.players[next];
        player.resources = player.resources.saturating_add(self.config.stipend(next));

        if let Some(winner) = self.check_winner(state) {
            debug!(%winner, turn = state.turn, "game over");
            state.finish(winner);
        }
    }

    /// Termination rules, first match wins.
    #[must_use]
    pub fn check_winner(&self, state: &GameState) -> Option<Side> {
        let network = &state.network;

        if network.security_level <= self.config.min_security {
            return Some(Side::Attacker);
        }
        if state.attacker().resources == 0 {
            return Some(Side::Defender);
        }
        if network.critical_nodes().any(|n| n.attacked) {
            return Some(Side::Attacker);
        }
        if network.critical_nodes().all(|n| n.protected)
            && network.security_level >= self.config.defender_win_security
            && state.turn > self.config.defender_win_min_turn
        {
            return Some(Side::Defender);
        }
        None
    }
}

fn check_affordable(state: &GameState, side: Side, id: &MoveId, cost: u32) -> Result<(), GameError> {
    let player = state.player(side);
    if !player.has_available(id) {
        return Err(InvalidMove::NotAvailable(id.clone(), side).into());
    }
    if cost > player.resources {
        return Err(InvalidMove::InsufficientResources {
            id: id.clone(),
            cost,
            available: player.resources,
        }
        .into());
    }
    Ok(())
}
