//! Error types.
//!
//! Every failed move leaves the `GameState` exactly as it was: the resolver
//! validates fully before it mutates anything.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{MoveId, Side};

/// Why a move was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum InvalidMove {
    #[error("unknown move id {0}")]
    UnknownMove(MoveId),
    #[error("move {0} is not available to the {1}")]
    NotAvailable(MoveId, Side),
    #[error("move {id} costs {cost} but only {available} resources remain")]
    InsufficientResources { id: MoveId, cost: u32, available: u32 },
    #[error("not the {attempted}'s turn ({current} to move)")]
    OutOfTurn { attempted: Side, current: Side },
}

/// Errors surfaced by the game engine.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("invalid move: {0}")]
    InvalidMove(#[from] InvalidMove),
    #[error("game has already ended")]
    GameAlreadyOver,
    /// Non-fatal: the side has nothing affordable and its turn is skipped.
    #[error("no legal moves for the {0}")]
    NoLegalMoves(Side),
}

/// Errors loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate catalog id: {0}")]
    DuplicateId(MoveId),
    #[error("catalog entry {0} has an empty id")]
    EmptyId(usize),
}

/// What was wrong with a catalog field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum IntegrityProblem {
    #[error("is missing; treating it as 0")]
    Missing,
    #[error("is out of range; clamped")]
    OutOfRange,
}

/// A catalog entry with a missing or out-of-range numeric field. Non-fatal:
/// the value is replaced and loading continues.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("catalog entry {entry}: {field} {problem}")]
pub struct DataIntegrity {
    pub entry: MoveId,
    pub field: &'static str,
    pub problem: IntegrityProblem,
}
