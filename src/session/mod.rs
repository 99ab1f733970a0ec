//! Game sessions.
//!
//! A `GameSession` bundles the state of one game with its predictor, its
//! defender AI and its odds estimator. The collaborator submits attacker
//! moves; the session replies with the AI's defense, fresh odds and a
//! forecast of the attacker's next move. Sessions share nothing but the
//! immutable catalog, so any number can run side by side.

pub mod autoplay;
pub mod game;

pub use autoplay::{play_game, AttackerPolicy, GameRecord, GreedyAttacker, PredictedAttacker, RandomAttacker};
pub use game::{GameSession, TurnReport};
