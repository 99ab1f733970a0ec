//! # netwar
//!
//! Decision and analytics engine for a turn-based attacker-vs-defender
//! network wargame.
//!
//! ## Design Principles
//!
//! 1. **Validate, then mutate**: `CombatResolver` checks every move in
//!    full before touching the state, so a rejected move changes nothing.
//!
//! 2. **Persistent Data Structures**: O(1) state cloning via `im-rs`, so
//!    the minimax search can simulate each branch on its own copy.
//!
//! 3. **Configuration Over Convention**: rule constants live in
//!    `GameConfig`, move content in a `Catalog`.
//!
//! ## Modules
//!
//! - `core`: Sides, configuration, network nodes, moves, state, RNG
//! - `catalog`: Attack and defense definitions, standard content, JSON loading
//! - `rules`: Combat resolution and end-of-ply housekeeping
//! - `ai`: Minimax defender with alpha-beta pruning
//! - `predict`: Attacker move forecasting
//! - `odds`: Win-probability estimation
//! - `session`: One game as a context object, plus scripted attackers
//! - `error`: Error types

pub mod core;
pub mod catalog;
pub mod rules;
pub mod ai;
pub mod predict;
pub mod odds;
pub mod session;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Side, SideMap,
    GameConfig, GameRng,
    Criticality, NetworkNode, standard_topology,
    Move, MoveId,
    DeployedDefense, GameState, NetworkState, PlayerState,
};

pub use crate::catalog::{
    AttackDefinition, DefenseDefinition, SecondaryEffect,
    Catalog, LoadReport, load_catalog, standard_catalog,
};

pub use crate::rules::{AttackOutcome, CombatResolver, DefenseOutcome, MoveOutcome};

pub use crate::ai::{MinimaxAI, SearchConfig, SearchStats};

pub use crate::predict::{
    AttackPattern, AttackPredictor, AttackRecord, Confidence,
    Prediction, PredictionFactors, PredictionSummary,
};

pub use crate::odds::{WinProbability, WinProbabilityEstimator};

pub use crate::session::{GameSession, TurnReport};

pub use crate::error::{CatalogError, DataIntegrity, GameError, IntegrityProblem, InvalidMove};
