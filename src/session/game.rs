//! One running game: state, predictor and defender AI behind a single
//! context object.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ai::{MinimaxAI, SearchConfig};
use crate::catalog::{opening_attack_ids, standard_catalog, Catalog};
use crate::core::{standard_topology, GameConfig, GameState, MoveId, NetworkNode, Side};
use crate::error::GameError;
use crate::odds::{OddsConfig, WinProbability, WinProbabilityEstimator};
use crate::predict::{AttackPredictor, DetailedAnalysis, PredictionSummary};
use crate::rules::{AttackOutcome, CombatResolver, DefenseOutcome};

/// Everything that happened in one attacker ply and the defender's reply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    /// The attack, or `None` if the attacker passed.
    pub attack: Option<AttackOutcome>,
    /// The AI's defense, if it had one to play.
    pub defense: Option<DefenseOutcome>,
    /// Set when the defender had nothing legal to play and its turn was skipped.
    pub skipped: Option<GameError>,
    pub odds: WinProbability,
    /// Forecast for the attacker's next ply; `None` once the game is over.
    pub predictions: Option<PredictionSummary>,
    pub turn: u32,
    pub security: f64,
    pub game_over: bool,
    pub winner: Option<Side>,
}

/// A single game against the minimax defender.
///
/// ```
/// use netwar::session::GameSession;
///
/// let mut session = GameSession::standard();
/// let report = session.submit_attack("phishing").unwrap();
///
/// assert!(report.attack.is_some());
/// assert!((report.odds.attacker + report.odds.defender - 100.0).abs() < 1e-9);
/// ```
#[derive(Clone, Debug)]
pub struct GameSession {
    resolver: CombatResolver,
    ai: MinimaxAI,
    predictor: AttackPredictor,
    estimator: WinProbabilityEstimator,
    topology: Vec<NetworkNode>,
    opening_attacks: Vec<MoveId>,
    state: GameState,
}

impl GameSession {
    /// Create a session over the standard topology.
    ///
    /// The attacker opens with the standard opening attacks present in
    /// `catalog`, or every catalog attack if none of them are.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, config: GameConfig) -> Self {
        let mut opening_attacks: Vec<MoveId> = opening_attack_ids()
            .into_iter()
            .filter(|id| catalog.contains_attack(id.as_str()))
            .collect();
        if opening_attacks.is_empty() {
            opening_attacks = catalog.attacks().map(|a| a.id.clone()).collect();
        }

        let predictor = AttackPredictor::new(&config);
        let resolver = CombatResolver::new(catalog, config);
        let topology = standard_topology();
        let state = resolver.new_game(topology.clone(), opening_attacks.clone());

        Self {
            ai: MinimaxAI::new(resolver.clone(), SearchConfig::default()),
            resolver,
            predictor,
            estimator: WinProbabilityEstimator::default(),
            topology,
            opening_attacks,
            state,
        }
    }

    /// The standard catalog with default rules.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Arc::new(standard_catalog()), GameConfig::default())
    }

    /// Replace the network (builder pattern). Restarts the game.
    #[must_use]
    pub fn with_topology(mut self, nodes: Vec<NetworkNode>) -> Self {
        self.topology = nodes;
        self.reset();
        self
    }

    /// Replace the attacker's opening move set (builder pattern). Restarts the game.
    #[must_use]
    pub fn with_opening_attacks(mut self, ids: impl IntoIterator<Item = MoveId>) -> Self {
        self.opening_attacks = ids.into_iter().collect();
        self.reset();
        self
    }

    /// Set the defender's search parameters (builder pattern).
    #[must_use]
    pub fn with_search(mut self, config: SearchConfig) -> Self {
        self.ai = MinimaxAI::new(self.resolver.clone(), config);
        self
    }

    /// Set the odds override thresholds (builder pattern).
    #[must_use]
    pub fn with_odds(mut self, config: OddsConfig) -> Self {
        self.estimator = WinProbabilityEstimator::new(config);
        self
    }

    /// Current game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The attack predictor.
    #[must_use]
    pub fn predictor(&self) -> &AttackPredictor {
        &self.predictor
    }

    /// The resolver driving this game.
    #[must_use]
    pub fn resolver(&self) -> &CombatResolver {
        &self.resolver
    }

    /// The defender AI.
    #[must_use]
    pub fn ai(&self) -> &MinimaxAI {
        &self.ai
    }

    /// Play an attack, then let the AI defend.
    ///
    /// On error nothing changes: not the state, not the predictor.
    pub fn submit_attack(&mut self, id: &str) -> Result<TurnReport, GameError> {
        let id = MoveId::new(id);
        let attack = self.resolver.attack(&mut self.state, &id)?;

        let catalog = self.resolver.catalog_handle();
        if let Some(definition) = catalog.attack(id.as_str()) {
            self.predictor.update_history(definition, &self.state);
        }

        let mut report = self.defender_reply()?;
        report.attack = Some(attack);
        Ok(report)
    }

    /// Pass the attacker's turn, then let the AI defend.
    ///
    /// Used when the attacker has no affordable attack left.
    pub fn pass_attack(&mut self) -> Result<TurnReport, GameError> {
        self.resolver.skip_turn(&mut self.state)?;
        self.defender_reply()
    }

    fn defender_reply(&mut self) -> Result<TurnReport, GameError> {
        let mut defense = None;
        let mut skipped = None;

        if !self.state.game_over {
            match self.ai.get_best_move(&self.state) {
                Some(id) => defense = Some(self.resolver.defend(&mut self.state, &id)?),
                None => {
                    warn!(turn = self.state.turn, "defender has no legal defense");
                    self.resolver.skip_turn(&mut self.state)?;
                    skipped = Some(GameError::NoLegalMoves(Side::Defender));
                }
            }
        }

        if self.state.game_over {
            info!(winner = ?self.state.winner, turn = self.state.turn, "game ended");
        }

        Ok(TurnReport {
            attack: None,
            defense,
            skipped,
            odds: self.win_probability(),
            predictions: (!self.state.game_over).then(|| self.predictions()),
            turn: self.state.turn,
            security: self.state.security(),
            game_over: self.state.game_over,
            winner: self.state.winner,
        })
    }

    /// Forecast over the attacker's currently legal attacks.
    #[must_use]
    pub fn predictions(&self) -> PredictionSummary {
        self.predictor
            .prediction_summary(self.resolver.legal_attacks(&self.state), &self.state)
    }

    /// Factor breakdown over the attacker's currently legal attacks.
    #[must_use]
    pub fn analysis(&self) -> DetailedAnalysis {
        self.predictor
            .detailed_analysis(self.resolver.legal_attacks(&self.state), &self.state)
    }

    /// Current odds.
    #[must_use]
    pub fn win_probability(&self) -> WinProbability {
        self.estimator
            .estimate(&self.state, self.resolver.catalog(), self.resolver.config())
    }

    /// Start over: fresh state, empty predictor history.
    pub fn reset(&mut self) {
        self.state = self
            .resolver
            .new_game(self.topology.clone(), self.opening_attacks.clone());
        self.predictor.reset();
        info!(nodes = self.topology.len(), attacks = self.opening_attacks.len(), "game reset");
    }
}
