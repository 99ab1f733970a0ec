//! Combat rules.
//!
//! `CombatResolver` is the only code that mutates a `GameState` during
//! play. The search, the predictor and the odds estimator all read state
//! and, where they simulate, apply moves to their own clones.

pub mod resolver;

pub use resolver::{AttackOutcome, CombatResolver, DefenseOutcome, MoveOutcome};
