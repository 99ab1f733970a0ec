//! Online forecast of the attacker's next move.
//!
//! The predictor keeps the last `HISTORY_CAP` attacks and two derived
//! count tables: type transitions, one row per previous type, and type
//! frequencies. Both tables are
//! rebuilt from the window after every append, so they always describe
//! exactly the records currently held.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use super::record::{AttackPattern, AttackRecord, Confidence, Prediction, PredictionFactors};
use super::summary::{percent, AnalysisEntry, DetailedAnalysis, HistoryStats, PredictionSummary, RankedAttack};
use crate::catalog::AttackDefinition;
use crate::core::{GameConfig, GameState};

/// Maximum number of attacks remembered.
pub const HISTORY_CAP: usize = 50;

const RECENCY_WINDOW: usize = 3;
const PATTERN_WINDOW: usize = 5;

/// Attack forecaster.
#[derive(Clone, Debug)]
pub struct AttackPredictor {
    history: VecDeque<AttackRecord>,
    transitions: FxHashMap<String, FxHashMap<String, u32>>,
    frequency: FxHashMap<String, u32>,
    max_security: f64,
}

impl Default for AttackPredictor {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl AttackPredictor {
    /// Create an empty predictor for games played under `config`.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            history: VecDeque::with_capacity(HISTORY_CAP),
            transitions: FxHashMap::default(),
            frequency: FxHashMap::default(),
            max_security: config.max_security,
        }
    }

    /// Recorded attacks, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &AttackRecord> {
        self.history.iter()
    }

    /// Number of recorded attacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether no attack has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Count of `from -> to` type transitions in the window.
    #[must_use]
    pub fn transition_count(&self, from: &str, to: &str) -> u32 {
        self.transitions
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(0)
    }

    /// Occurrences of a type in the window.
    #[must_use]
    pub fn frequency_of(&self, attack_type: &str) -> u32 {
        self.frequency.get(attack_type).copied().unwrap_or(0)
    }

    /// Record an attack just applied to `state`.
    pub fn update_history(&mut self, attack: &AttackDefinition, state: &GameState) {
        self.history.push_back(AttackRecord::new(attack, state.turn));
        while self.history.len() > HISTORY_CAP {
            self.history.pop_front();
        }
        self.rebuild();
        debug!(attack = %attack.id, window = self.history.len(), "attack recorded");
    }

    fn rebuild(&mut self) {
        self.transitions.clear();
        self.frequency.clear();

        let mut previous: Option<&str> = None;
        for record in &self.history {
            if let Some(prev) = previous {
                *self
                    .transitions
                    .entry(prev.to_string())
                    .or_default()
                    .entry(record.attack_type.clone())
                    .or_insert(0) += 1;
            }
            *self.frequency.entry(record.attack_type.clone()).or_insert(0) += 1;
            previous = Some(&record.attack_type);
        }
    }

    /// Forget everything.
    pub fn reset(&mut self) {
        self.history.clear();
        self.transitions.clear();
        self.frequency.clear();
    }

    /// Type tags of the last `n` records, oldest first.
    fn recent_types(&self, n: usize) -> SmallVec<[&str; PATTERN_WINDOW]> {
        let skip = self.history.len().saturating_sub(n);
        self.history.iter().skip(skip).map(|r| r.attack_type.as_str()).collect()
    }

    // === Factors ===

    fn transition_factor(&self, attack_type: &str) -> f64 {
        let Some(last) = self.history.back() else {
            return 0.0;
        };
        let from = last.attack_type.as_str();
        let total: u32 = self.transitions.get(from).map_or(0, |row| row.values().sum());
        if total == 0 {
            0.0
        } else {
            f64::from(self.transition_count(from, attack_type)) / f64::from(total)
        }
    }

    fn frequency_factor(&self, attack_type: &str) -> f64 {
        if self.history.is_empty() {
            0.0
        } else {
            f64::from(self.frequency_of(attack_type)) / self.history.len() as f64
        }
    }

    fn resource_factor(attack: &AttackDefinition, state: &GameState) -> f64 {
        if attack.cost == 0 {
            return 1.0;
        }
        let ratio = f64::from(state.attacker().resources) / f64::from(attack.cost);
        (ratio / 5.0).min(1.0)
    }

    fn efficiency_factor(attack: &AttackDefinition, state: &GameState) -> f64 {
        let exposed = state.network.targets_for(&attack.attack_type).count();
        (base_efficiency(attack) + 0.1 * exposed as f64).min(1.0)
    }

    fn recency_factor(&self, attack_type: &str) -> f64 {
        let repeats = self
            .recent_types(RECENCY_WINDOW)
            .iter()
            .filter(|&&t| t == attack_type)
            .count();
        (1.0 - 0.3 * repeats as f64).max(0.0)
    }

    fn security_factor(&self, attack: &AttackDefinition, state: &GameState) -> f64 {
        (state.security() / self.max_security) * (f64::from(attack.cost) / 10.0)
    }

    /// All six factors for one candidate.
    #[must_use]
    pub fn factors(&self, attack: &AttackDefinition, state: &GameState) -> PredictionFactors {
        PredictionFactors {
            transition: self.transition_factor(&attack.attack_type),
            frequency: self.frequency_factor(&attack.attack_type),
            resource: Self::resource_factor(attack, state),
            efficiency: Self::efficiency_factor(attack, state),
            recency: self.recency_factor(&attack.attack_type),
            security: self.security_factor(attack, state),
        }
    }

    // === Forecasts ===

    /// Rank `candidates` by normalized probability, highest first.
    ///
    /// Probabilities sum to 1 over a non-empty candidate set. Equal
    /// probabilities keep candidate order.
    pub fn predict_next_attack<'a, I>(&self, candidates: I, state: &GameState) -> Vec<Prediction>
    where
        I: IntoIterator<Item = &'a AttackDefinition>,
    {
        let candidates: Vec<&AttackDefinition> = candidates.into_iter().collect();
        if candidates.is_empty() {
            return Vec::new();
        }
        let uniform = 1.0 / candidates.len() as f64;

        if self.history.is_empty() {
            return candidates
                .into_iter()
                .map(|attack| Prediction {
                    attack: attack.clone(),
                    probability: uniform,
                    confidence: Confidence::Low,
                    factors: PredictionFactors {
                        transition: 0.0,
                        frequency: 0.0,
                        resource: uniform,
                        efficiency: base_efficiency(attack),
                        recency: 0.0,
                        security: self.security_factor(attack, state),
                    },
                })
                .collect();
        }

        let mut predictions: Vec<Prediction> = candidates
            .into_iter()
            .map(|attack| {
                let factors = self.factors(attack, state);
                let raw = factors.weighted();
                Prediction {
                    attack: attack.clone(),
                    probability: raw,
                    // Judged on the raw score, before normalization
                    confidence: Confidence::assess(raw, &factors),
                    factors,
                }
            })
            .collect();

        let total: f64 = predictions.iter().map(|p| p.probability).sum();
        for prediction in &mut predictions {
            prediction.probability = if total > 0.0 {
                prediction.probability / total
            } else {
                uniform
            };
        }

        predictions.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        predictions
    }

    /// Shape of the last five attacks.
    #[must_use]
    pub fn recent_pattern(&self) -> AttackPattern {
        if self.history.len() < 2 {
            return AttackPattern::InsufficientData;
        }

        let types = self.recent_types(PATTERN_WINDOW);
        let counts = tally(&types);

        if counts.len() == 1 {
            AttackPattern::Repeating(types[0].to_string())
        } else if counts.len() == types.len() {
            AttackPattern::Diverse
        } else {
            AttackPattern::Favoring(first_max(&counts).to_string())
        }
    }

    /// Most frequent type over the whole window; earliest seen wins ties.
    #[must_use]
    pub fn most_used_type(&self) -> Option<&str> {
        let types: Vec<&str> = self.history.iter().map(|r| r.attack_type.as_str()).collect();
        if types.is_empty() {
            return None;
        }
        Some(first_max(&tally(&types)))
    }

    /// Aggregate statistics over the window.
    #[must_use]
    pub fn stats(&self) -> HistoryStats {
        let total = self.history.len();
        let average_cost = if total == 0 {
            0.0
        } else {
            self.history.iter().map(|r| f64::from(r.cost)).sum::<f64>() / total as f64
        };
        HistoryStats {
            total_attacks: total,
            unique_types: self.frequency.len(),
            average_cost,
            most_used_type: self.most_used_type().map(str::to_string),
            transition_count: self.transitions.values().map(|row| row.len()).sum(),
        }
    }

    /// Ranked forecast with a headline.
    pub fn prediction_summary<'a, I>(&self, candidates: I, state: &GameState) -> PredictionSummary
    where
        I: IntoIterator<Item = &'a AttackDefinition>,
    {
        let predictions = self.predict_next_attack(candidates, state);
        let top = predictions.first();

        PredictionSummary {
            most_likely: top.map(|p| p.attack.name.clone()),
            confidence: top.map(|p| p.confidence),
            recent_pattern: top.map(|_| self.recent_pattern()),
            total_attacks: self.history.len(),
            predictions: predictions.iter().map(RankedAttack::from).collect(),
        }
    }

    /// Per-candidate factor percentages plus history statistics.
    pub fn detailed_analysis<'a, I>(&self, candidates: I, state: &GameState) -> DetailedAnalysis
    where
        I: IntoIterator<Item = &'a AttackDefinition>,
    {
        let entries = self
            .predict_next_attack(candidates, state)
            .into_iter()
            .map(|p| AnalysisEntry {
                probability: percent(p.probability),
                factors: (&p.factors).into(),
                attack: p.attack,
            })
            .collect();

        DetailedAnalysis {
            entries,
            history: self.stats(),
        }
    }
}

/// Success rate, or 0.5 when the catalog entry carries none.
fn base_efficiency(attack: &AttackDefinition) -> f64 {
    if attack.success_rate > 0.0 {
        attack.success_rate
    } else {
        0.5
    }
}

/// Counts per type in first-seen order.
fn tally<'a>(types: &[&'a str]) -> SmallVec<[(&'a str, usize); PATTERN_WINDOW]> {
    let mut counts: SmallVec<[(&str, usize); PATTERN_WINDOW]> = SmallVec::new();
    for &t in types {
        match counts.iter_mut().find(|(seen, _)| *seen == t) {
            Some((_, n)) => *n += 1,
            None => counts.push((t, 1)),
        }
    }
    counts
}

/// First entry holding the maximum count.
fn first_max<'a>(counts: &[(&'a str, usize)]) -> &'a str {
    let mut best = ("", 0);
    for &(t, n) in counts {
        if n > best.1 {
            best = (t, n);
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::standard_catalog;
    use crate::core::{standard_topology, MoveId};

    fn state() -> GameState {
        GameState::new(&GameConfig::default(), standard_topology(), [], [])
    }

    fn record(predictor: &mut AttackPredictor, ids: &[&str]) {
        let catalog = standard_catalog();
        let state = state();
        for id in ids {
            predictor.update_history(catalog.attack(id).unwrap(), &state);
        }
    }

    #[test]
    fn test_empty_history_is_uniform() {
        let catalog = standard_catalog();
        let predictor = AttackPredictor::default();
        let candidates: Vec<_> = catalog.attacks().take(4).collect();

        let predictions = predictor.predict_next_attack(candidates.iter().copied(), &state());

        assert_eq!(predictions.len(), 4);
        for (p, c) in predictions.iter().zip(&candidates) {
            assert_eq!(p.attack.id, c.id);
            assert_eq!(p.probability, 0.25);
            assert_eq!(p.confidence, Confidence::Low);
            assert_eq!(p.factors.resource, 0.25);
            assert_eq!(p.factors.efficiency, c.success_rate);
            assert_eq!(p.factors.transition, 0.0);
            assert_eq!(p.factors.recency, 0.0);
        }
    }

    #[test]
    fn test_no_candidates() {
        let predictor = AttackPredictor::default();
        assert!(predictor.predict_next_attack([], &state()).is_empty());
    }

    #[test]
    fn test_window_capped_and_tables_match() {
        let mut predictor = AttackPredictor::default();
        for _ in 0..30 {
            record(&mut predictor, &["dos", "phishing"]);
        }

        assert_eq!(predictor.len(), HISTORY_CAP);
        assert_eq!(predictor.frequency_of("network"), 25);
        assert_eq!(predictor.frequency_of("social"), 25);
        assert_eq!(
            predictor.transition_count("network", "social") + predictor.transition_count("social", "network"),
            (HISTORY_CAP - 1) as u32
        );
        // Oldest records went first
        assert_eq!(predictor.history().next().map(|r| r.id.clone()), Some(MoveId::new("dos")));
    }

    #[test]
    fn test_transition_rows() {
        let mut predictor = AttackPredictor::default();
        record(&mut predictor, &["dos", "phishing", "dos", "sql", "dos", "phishing"]);

        assert_eq!(predictor.transition_count("network", "social"), 2);
        assert_eq!(predictor.transition_count("network", "application"), 1);
        assert_eq!(predictor.transition_count("application", "network"), 1);
        assert_eq!(predictor.transition_count("social", "application"), 0);
        assert_eq!(predictor.transition_count("system", "network"), 0);
        // network->social, network->application, social->network, application->network
        assert_eq!(predictor.stats().transition_count, 4);
    }

    #[test]
    fn test_factors() {
        let catalog = standard_catalog();
        let mut predictor = AttackPredictor::default();
        record(&mut predictor, &["dos", "sql", "dos", "phishing", "dos"]);

        let state = state();
        let dos = catalog.attack("dos").unwrap();
        let factors = predictor.factors(dos, &state);

        // network -> {application, social} once each
        assert_eq!(factors.transition, 0.0);
        assert_eq!(factors.frequency, 0.6);
        assert_eq!(factors.resource, 1.0);
        // Web Server is exposed to network
        assert!((factors.efficiency - 0.8).abs() < 1e-9);
        // Two network attacks among the last three
        assert!((factors.recency - 0.4).abs() < 1e-9);
        assert!((factors.security - 0.3).abs() < 1e-9);

        let sql = catalog.attack("sql").unwrap();
        assert_eq!(predictor.factors(sql, &state).transition, 0.5);
    }

    #[test]
    fn test_probabilities_normalized_and_sorted() {
        let catalog = standard_catalog();
        let mut predictor = AttackPredictor::default();
        record(&mut predictor, &["phishing", "phishing", "brute"]);

        let predictions = predictor.predict_next_attack(catalog.attacks(), &state());

        let total: f64 = predictions.iter().map(|p| p.probability).sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(predictions.windows(2).all(|w| w[0].probability >= w[1].probability));
    }

    #[test]
    fn test_recent_pattern() {
        let mut predictor = AttackPredictor::default();
        assert_eq!(predictor.recent_pattern(), AttackPattern::InsufficientData);

        record(&mut predictor, &["dos"]);
        assert_eq!(predictor.recent_pattern(), AttackPattern::InsufficientData);

        record(&mut predictor, &["mitm"]);
        assert_eq!(predictor.recent_pattern(), AttackPattern::Repeating("network".into()));

        record(&mut predictor, &["sql", "phishing"]);
        assert_eq!(predictor.recent_pattern(), AttackPattern::Favoring("network".into()));

        predictor.reset();
        record(&mut predictor, &["dos", "sql", "phishing", "malware", "brute"]);
        assert_eq!(predictor.recent_pattern(), AttackPattern::Diverse);
    }

    #[test]
    fn test_favoring_tie_goes_to_first_seen() {
        let mut predictor = AttackPredictor::default();
        record(&mut predictor, &["sql", "dos", "dos", "sql", "phishing"]);
        assert_eq!(predictor.recent_pattern(), AttackPattern::Favoring("application".into()));
        assert_eq!(predictor.most_used_type(), Some("application"));
    }

    #[test]
    fn test_stats_and_reset() {
        let mut predictor = AttackPredictor::default();
        assert_eq!(predictor.stats(), HistoryStats::default());

        record(&mut predictor, &["dos", "sql", "dos"]);
        let stats = predictor.stats();
        assert_eq!(stats.total_attacks, 3);
        assert_eq!(stats.unique_types, 2);
        assert!((stats.average_cost - 10.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.most_used_type.as_deref(), Some("network"));
        assert_eq!(stats.transition_count, 2);

        predictor.reset();
        assert!(predictor.is_empty());
        assert_eq!(predictor.stats().transition_count, 0);
    }

    #[test]
    fn test_summary() {
        let catalog = standard_catalog();
        let mut predictor = AttackPredictor::default();
        record(&mut predictor, &["dos", "dos"]);

        let summary = predictor.prediction_summary(catalog.attacks(), &state());
        assert_eq!(summary.predictions.len(), 7);
        assert_eq!(summary.total_attacks, 2);
        assert_eq!(summary.most_likely.as_deref(), Some(summary.predictions[0].attack_name.as_str()));
        assert_eq!(summary.recent_pattern, Some(AttackPattern::Repeating("network".into())));

        let empty = predictor.prediction_summary([], &state());
        assert!(empty.predictions.is_empty());
        assert_eq!(empty.most_likely, None);
        assert_eq!(empty.total_attacks, 2);
    }

    #[test]
    fn test_detailed_analysis() {
        let catalog = standard_catalog();
        let mut predictor = AttackPredictor::default();
        record(&mut predictor, &["phishing"]);

        let analysis = predictor.detailed_analysis(catalog.attacks().take(2), &state());
        assert_eq!(analysis.entries.len(), 2);
        assert_eq!(analysis.history.total_attacks, 1);
        let total: u32 = analysis.entries.iter().map(|e| e.probability).sum();
        assert!((99..=101).contains(&total));
    }
}
