//! Core types: sides, configuration, network, moves, state, RNG.
//!
//! Everything here is passive data. Only `rules::CombatResolver` mutates a
//! `GameState` during play.

pub mod side;
pub mod config;
pub mod network;
pub mod action;
pub mod state;
pub mod rng;

pub use side::{Side, SideMap};
pub use config::GameConfig;
pub use network::{standard_topology, Criticality, NetworkNode};
pub use action::{Move, MoveId};
pub use state::{DeployedDefense, GameState, NetworkState, PlayerState};
pub use rng::GameRng;
