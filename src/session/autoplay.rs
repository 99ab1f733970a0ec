//! Scripted attackers for driving whole games against the AI defender.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::game::{GameSession, TurnReport};
use crate::core::{GameRng, MoveId, Side};
use crate::error::GameError;

/// Chooses the attacker's move.
pub trait AttackerPolicy {
    /// Pick an attack for the session's current state.
    ///
    /// Returns `None` if no legal attack exists.
    fn choose_attack(&mut self, session: &GameSession) -> Option<MoveId>;
}

/// Uniformly random legal attack.
#[derive(Clone, Debug)]
pub struct RandomAttacker {
    rng: GameRng,
}

impl RandomAttacker {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self { rng: GameRng::new(seed) }
    }
}

impl AttackerPolicy for RandomAttacker {
    fn choose_attack(&mut self, session: &GameSession) -> Option<MoveId> {
        let legal: Vec<MoveId> = session
            .resolver()
            .legal_attacks(session.state())
            .map(|a| a.id.clone())
            .collect();
        self.rng.choose(&legal).cloned()
    }
}

/// The legal attack that leaves the lowest security right now.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyAttacker;

impl AttackerPolicy for GreedyAttacker {
    fn choose_attack(&mut self, session: &GameSession) -> Option<MoveId> {
        let resolver = session.resolver();
        let state = session.state();

        let mut best: Option<(MoveId, f64)> = None;
        for attack in resolver.legal_attacks(state) {
            let mut probe = state.clone();
            let Ok(outcome) = resolver.attack(&mut probe, &attack.id) else {
                continue;
            };
            // A finished game in the attacker's favour beats any security level
            let score = if probe.winner == Some(Side::Attacker) {
                f64::NEG_INFINITY
            } else {
                outcome.security_after
            };
            if best.as_ref().map_or(true, |(_, s)| score < *s) {
                best = Some((attack.id.clone(), score));
            }
        }
        best.map(|(id, _)| id)
    }
}

/// Plays whatever the predictor rates most likely.
#[derive(Clone, Copy, Debug, Default)]
pub struct PredictedAttacker;

impl AttackerPolicy for PredictedAttacker {
    fn choose_attack(&mut self, session: &GameSession) -> Option<MoveId> {
        session
            .predictor()
            .predict_next_attack(session.resolver().legal_attacks(session.state()), session.state())
            .into_iter()
            .next()
            .map(|p| p.attack.id)
    }
}

/// Result of an autoplayed game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub turns: Vec<TurnReport>,
    /// `None` if the turn limit was hit first.
    pub winner: Option<Side>,
    pub final_turn: u32,
    pub final_security: f64,
}

impl GameRecord {
    /// Attacker plies played.
    #[must_use]
    pub fn rounds(&self) -> usize {
        self.turns.len()
    }
}

/// Play attacker plies chosen by `policy` until the game ends or
/// `max_rounds` attacker plies have been played.
pub fn play_game<P: AttackerPolicy + ?Sized>(
    session: &mut GameSession,
    policy: &mut P,
    max_rounds: usize,
) -> Result<GameRecord, GameError> {
    let mut turns = Vec::new();

    while !session.state().game_over && turns.len() < max_rounds {
        let report = match policy.choose_attack(session) {
            Some(id) => session.submit_attack(id.as_str())?,
            None => session.pass_attack()?,
        };
        turns.push(report);
    }

    let state = session.state();
    info!(winner = ?state.winner, rounds = turns.len(), "autoplay finished");

    Ok(GameRecord {
        winner: state.winner,
        final_turn: state.turn,
        final_security: state.security(),
        turns,
    })
}
