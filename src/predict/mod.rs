//! Attacker move forecasting.
//!
//! `AttackPredictor` scores each candidate attack on six signals drawn
//! from the recent history and the current state, then normalizes the
//! weighted scores into a probability distribution:
//!
//! | factor     | weight |
//! |------------|--------|
//! | transition | 0.25   |
//! | frequency  | 0.20   |
//! | resource   | 0.15   |
//! | efficiency | 0.20   |
//! | recency    | 0.10   |
//! | security   | 0.10   |

pub mod predictor;
pub mod record;
pub mod summary;

pub use predictor::{AttackPredictor, HISTORY_CAP};
pub use record::{AttackPattern, AttackRecord, Confidence, Prediction, PredictionFactors};
pub use summary::{
    AnalysisEntry, DetailedAnalysis, FactorPercentages, HistoryStats, PredictionSummary, RankedAttack,
};
