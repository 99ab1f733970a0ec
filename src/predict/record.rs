//! Predictor value types: history records, factors, confidence, patterns.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::AttackDefinition;
use crate::core::MoveId;

/// One observed attack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AttackRecord {
    pub id: MoveId,
    pub name: String,
    #[serde(rename = "type")]
    pub attack_type: String,
    pub cost: u32,
    pub success_rate: f64,
    /// Turn on which the attack was recorded.
    pub turn: u32,
}

impl AttackRecord {
    #[must_use]
    pub fn new(attack: &AttackDefinition, turn: u32) -> Self {
        Self {
            id: attack.id.clone(),
            name: attack.name.clone(),
            attack_type: attack.attack_type.clone(),
            cost: attack.cost,
            success_rate: attack.success_rate,
            turn,
        }
    }
}

/// The six per-candidate signals, each roughly in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionFactors {
    /// Share of transitions out of the last attack type that led to this type.
    pub transition: f64,
    /// Share of the history with this type.
    pub frequency: f64,
    /// How comfortably the attacker can afford the move.
    pub resource: f64,
    /// Success rate plus exposure of unprotected nodes.
    pub efficiency: f64,
    /// Falls as this type recurs in the last three attacks.
    pub recency: f64,
    /// Remaining security scaled by the move's cost.
    pub security: f64,
}

impl PredictionFactors {
    pub const TRANSITION_WEIGHT: f64 = 0.25;
    pub const FREQUENCY_WEIGHT: f64 = 0.20;
    pub const RESOURCE_WEIGHT: f64 = 0.15;
    pub const EFFICIENCY_WEIGHT: f64 = 0.20;
    pub const RECENCY_WEIGHT: f64 = 0.10;
    pub const SECURITY_WEIGHT: f64 = 0.10;

    /// Factor values in declaration order.
    #[must_use]
    pub fn values(&self) -> [f64; 6] {
        [
            self.transition,
            self.frequency,
            self.resource,
            self.efficiency,
            self.recency,
            self.security,
        ]
    }

    /// Weighted raw score.
    #[must_use]
    pub fn weighted(&self) -> f64 {
        self.transition * Self::TRANSITION_WEIGHT
            + self.frequency * Self::FREQUENCY_WEIGHT
            + self.resource * Self::RESOURCE_WEIGHT
            + self.efficiency * Self::EFFICIENCY_WEIGHT
            + self.recency * Self::RECENCY_WEIGHT
            + self.security * Self::SECURITY_WEIGHT
    }

    /// Unweighted mean of the six values.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.values().iter().sum::<f64>() / 6.0
    }
}

/// Confidence label attached to a prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Confidence {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl Confidence {
    /// Label for `(probability + mean factor) / 2`.
    #[must_use]
    pub fn assess(probability: f64, factors: &PredictionFactors) -> Self {
        let score = (probability + factors.mean()) / 2.0;
        if score >= 0.8 {
            Confidence::VeryHigh
        } else if score >= 0.6 {
            Confidence::High
        } else if score >= 0.4 {
            Confidence::Medium
        } else if score >= 0.2 {
            Confidence::Low
        } else {
            Confidence::VeryLow
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Confidence::VeryLow => "Very Low",
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
            Confidence::VeryHigh => "Very High",
        };
        f.write_str(label)
    }
}

/// Shape of the attacker's last few moves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "pattern", content = "type", rename_all = "snake_case")]
pub enum AttackPattern {
    /// Fewer than two attacks recorded.
    InsufficientData,
    /// Every recent attack had this type.
    Repeating(String),
    /// No recent type occurred twice.
    Diverse,
    /// This type occurred most often.
    Favoring(String),
}

impl fmt::Display for AttackPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackPattern::InsufficientData => f.write_str("Insufficient data"),
            AttackPattern::Repeating(t) => write!(f, "Repeating {t} attacks"),
            AttackPattern::Diverse => f.write_str("Diverse attack strategy"),
            AttackPattern::Favoring(t) => write!(f, "Favoring {t} attacks"),
        }
    }
}

/// One ranked forecast entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub attack: AttackDefinition,
    /// Normalized probability; sums to 1 over the candidate set.
    pub probability: f64,
    pub confidence: Confidence,
    pub factors: PredictionFactors,
}
