//! Depth-bounded minimax with alpha-beta pruning for the defender.
//!
//! The defender is the maximizing side. Every simulated move is applied to
//! its own clone of the parent state (O(1) thanks to `im`), so sibling
//! branches never observe each other's mutations.
//!
//! Each root candidate is searched with a full `(-inf, +inf)` window so
//! its score is exact and ties between candidates are real ties.

use std::time::Instant;

use tracing::{debug, trace};

use crate::catalog::DefenseDefinition;
use crate::core::{GameState, Move, MoveId, Side};
use crate::rules::CombatResolver;

use super::config::SearchConfig;
use super::eval::{self, recent_attack_types};
use super::stats::SearchStats;

const TIE_COVERAGE_WEIGHT: f64 = 5.0;
const TIE_DUPLICATE_PENALTY: f64 = 0.5;

/// Minimax defender AI.
///
/// ```
/// use std::sync::Arc;
/// use netwar::ai::{MinimaxAI, SearchConfig};
/// use netwar::catalog::{opening_attack_ids, standard_catalog};
/// use netwar::core::{standard_topology, GameConfig, Move};
/// use netwar::rules::CombatResolver;
///
/// let resolver = CombatResolver::new(Arc::new(standard_catalog()), GameConfig::default());
/// let mut state = resolver.new_game(standard_topology(), opening_attack_ids());
/// resolver.apply(&mut state, &Move::attack("brute")).unwrap();
///
/// let mut ai = MinimaxAI::new(resolver, SearchConfig::default().with_depth(2));
/// let defense = ai.get_best_move(&state).unwrap();
/// assert!(state.defender().has_available(&defense));
/// ```
#[derive(Clone, Debug)]
pub struct MinimaxAI {
    resolver: CombatResolver,
    config: SearchConfig,
    stats: SearchStats,
}

impl MinimaxAI {
    /// Create a new search context.
    #[must_use]
    pub fn new(resolver: CombatResolver, config: SearchConfig) -> Self {
        Self {
            resolver,
            config,
            stats: SearchStats::default(),
        }
    }

    /// Search configuration.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the most recent `get_best_move`.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// The resolver used to simulate moves.
    #[must_use]
    pub fn resolver(&self) -> &CombatResolver {
        &self.resolver
    }

    /// Static evaluation of `state` (defender-positive).
    #[must_use]
    pub fn evaluate(&self, state: &GameState) -> f64 {
        eval::evaluate(state, self.resolver.catalog(), self.resolver.config())
    }

    /// Pick the defense with the best minimax score.
    ///
    /// Returns `None` when the game is over, it is not the defender's turn,
    /// or no defense is both available and affordable.
    pub fn get_best_move(&mut self, state: &GameState) -> Option<MoveId> {
        let start = Instant::now();
        self.stats.reset();

        if state.game_over || state.current_player != Side::Defender {
            return None;
        }

        let child_depth = self.config.depth.saturating_sub(1);
        let mut best_score = f64::NEG_INFINITY;
        let mut tied: Vec<&DefenseDefinition> = Vec::new();

        let resolver = self.resolver.clone();
        for defense in resolver.legal_defenses(state) {
            let mut child = state.clone();
            if resolver.apply(&mut child, &Move::Defense(defense.id.clone())).is_err() {
                continue;
            }
            self.stats.nodes += 1;

            let score = self.minimax(&child, child_depth, false, f64::NEG_INFINITY, f64::INFINITY);
            trace!(defense = %defense.id, score, "root candidate");

            if tied.is_empty() || score > best_score {
                best_score = score;
                tied.clear();
                tied.push(defense);
            } else if score == best_score {
                tied.push(defense);
            }
        }

        self.stats.ties = tied.len() as u32;
        let choice = self.break_tie(state, &tied).map(|d| d.id.clone());
        self.stats.time_us = start.elapsed().as_micros() as u64;

        debug!(
            choice = ?choice.as_ref().map(MoveId::as_str),
            score = best_score,
            ties = self.stats.ties,
            nodes = self.stats.nodes,
            cutoffs = self.stats.cutoffs,
            "defense chosen"
        );
        choice
    }

    /// Rank tied candidates by coverage of the attacker's recent move types,
    /// discounting categories already deployed. Earlier candidates win.
    fn break_tie<'a>(&self, state: &GameState, tied: &[&'a DefenseDefinition]) -> Option<&'a DefenseDefinition> {
        let recent = recent_attack_types(state, self.resolver.catalog());
        let rank = |d: &DefenseDefinition| {
            let coverage: f64 = recent.iter().map(|t| d.effectiveness_against(t)).sum();
            TIE_COVERAGE_WEIGHT * coverage - TIE_DUPLICATE_PENALTY * state.deployed_of_type(&d.defense_type) as f64
        };

        let mut best: Option<(&'a DefenseDefinition, f64)> = None;
        for &candidate in tied {
            let r = rank(candidate);
            match best {
                Some((_, best_rank)) if r <= best_rank => {}
                _ => best = Some((candidate, r)),
            }
        }
        best.map(|(d, _)| d)
    }

    /// Minimax value of `state` searched `depth` plies deep.
    ///
    /// The maximizing ply enumerates the defender's legal defenses and the
    /// minimizing ply the attacker's legal attacks. A ply with nothing to
    /// play scores as a leaf.
    pub fn minimax(&mut self, state: &GameState, depth: u32, maximizing: bool, mut alpha: f64, mut beta: f64) -> f64 {
        if depth == 0 || state.game_over {
            self.stats.evaluations += 1;
            return self.evaluate(state);
        }

        let side = if maximizing { Side::Defender } else { Side::Attacker };
        let moves = self.resolver.legal_moves(state, side);

        let mut value = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };
        let mut searched = false;

        for mv in moves {
            let mut child = state.clone();
            if self.resolver.apply(&mut child, &mv).is_err() {
                continue;
            }
            searched = true;
            self.stats.nodes += 1;

            let score = self.minimax(&child, depth - 1, !maximizing, alpha, beta);
            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }

            if self.config.alpha_beta && beta <= alpha {
                self.stats.cutoffs += 1;
                trace!(%mv, depth, alpha, beta, "cutoff");
                break;
            }
        }

        if !searched {
            self.stats.evaluations += 1;
            return self.evaluate(state);
        }
        value
    }
}
