//! Win-probability estimation.
//!
//! Signal weights (points out of 100 before normalization):
//!
//! - security level: 35
//! - resource share: 25
//! - critical nodes protected vs attacked: 20
//! - deployed coverage of recent attacks: 10, defender only
//! - momentum: 10, split 70/30 around the configured midpoint

pub mod estimator;

pub use estimator::{
    turn_confidence, FactorShare, OddsBreakdown, OddsConfig, OddsOverride, WinProbability, WinProbabilityEstimator,
};
