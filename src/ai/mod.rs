//! Defender AI.
//!
//! ## Overview
//!
//! `MinimaxAI` searches a fixed number of plies ahead with alpha-beta
//! pruning and scores leaves with a weighted static evaluation:
//!
//! - security fraction (40)
//! - resource differential, capped (20)
//! - protected share of critical nodes (20)
//! - coverage of the attacker's last three move types, capped (20)
//! - variety of deployed defense categories
//! - exposure penalty against the most recent attack type
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use netwar::ai::{MinimaxAI, SearchConfig};
//! use netwar::catalog::standard_catalog;
//! use netwar::core::GameConfig;
//! use netwar::rules::CombatResolver;
//!
//! let resolver = CombatResolver::new(Arc::new(standard_catalog()), GameConfig::default());
//! let ai = MinimaxAI::new(resolver, SearchConfig::default().with_alpha_beta(false));
//! assert_eq!(ai.config().depth, 3);
//! ```

pub mod config;
pub mod eval;
pub mod minimax;
pub mod stats;

pub use config::SearchConfig;
pub use eval::{evaluate, Evaluation};
pub use minimax::MinimaxAI;
pub use stats::SearchStats;
