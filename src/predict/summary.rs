//! Collaborator-facing views of the predictor: ranked summary, per-factor
//! analysis and history statistics. Percentages are rounded to integers.

use serde::{Deserialize, Serialize};

use super::record::{AttackPattern, Confidence, Prediction, PredictionFactors};
use crate::catalog::AttackDefinition;
use crate::core::MoveId;

/// Round a `[0, 1]` share to a whole percentage.
#[must_use]
pub fn percent(share: f64) -> u32 {
    (share.max(0.0) * 100.0).round() as u32
}

/// One row of a prediction summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankedAttack {
    pub attack_id: MoveId,
    pub attack_name: String,
    pub attack_type: String,
    /// Whole percentage.
    pub probability: u32,
    pub confidence: Confidence,
    pub factors: PredictionFactors,
}

impl From<&Prediction> for RankedAttack {
    fn from(p: &Prediction) -> Self {
        Self {
            attack_id: p.attack.id.clone(),
            attack_name: p.attack.name.clone(),
            attack_type: p.attack.attack_type.clone(),
            probability: percent(p.probability),
            confidence: p.confidence,
            factors: p.factors,
        }
    }
}

/// Ranked forecast plus a headline.
///
/// With no candidates, `predictions` is empty and the headline fields
/// `most_likely`, `confidence` and `recent_pattern` are `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub predictions: Vec<RankedAttack>,
    /// Name of the top-ranked attack.
    pub most_likely: Option<String>,
    pub confidence: Option<Confidence>,
    pub total_attacks: usize,
    pub recent_pattern: Option<AttackPattern>,
}

impl PredictionSummary {
    /// Headline line for display.
    #[must_use]
    pub fn headline(&self) -> String {
        match (&self.most_likely, self.confidence, &self.recent_pattern) {
            (Some(name), Some(confidence), Some(pattern)) => {
                format!("{name} ({confidence} confidence); {pattern}")
            }
            _ => "No attacks available".to_string(),
        }
    }
}

/// Aggregate statistics over the history window.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub total_attacks: usize,
    pub unique_types: usize,
    pub average_cost: f64,
    pub most_used_type: Option<String>,
    /// Distinct (previous, next) type pairs seen.
    pub transition_count: usize,
}

/// Factor values as whole percentages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorPercentages {
    pub transition: u32,
    pub frequency: u32,
    pub resource: u32,
    pub efficiency: u32,
    pub recency: u32,
    pub security: u32,
}

impl From<&PredictionFactors> for FactorPercentages {
    fn from(f: &PredictionFactors) -> Self {
        Self {
            transition: percent(f.transition),
            frequency: percent(f.frequency),
            resource: percent(f.resource),
            efficiency: percent(f.efficiency),
            recency: percent(f.recency),
            security: percent(f.security),
        }
    }
}

/// Per-candidate breakdown row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEntry {
    pub attack: AttackDefinition,
    pub probability: u32,
    pub factors: FactorPercentages,
}

/// Every candidate's factor breakdown plus history statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    pub entries: Vec<AnalysisEntry>,
    pub history: HistoryStats,
}
