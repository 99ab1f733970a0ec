//! Minimax defender integration tests.

use std::sync::Arc;

use netwar::ai::{MinimaxAI, SearchConfig};
use netwar::catalog::{opening_attack_ids, standard_catalog};
use netwar::core::{standard_topology, GameConfig, GameState, MoveId, Side};
use netwar::rules::CombatResolver;

fn setup(config: SearchConfig) -> (MinimaxAI, GameState) {
    let resolver = CombatResolver::new(Arc::new(standard_catalog()), GameConfig::default());
    let state = resolver.new_game(standard_topology(), opening_attack_ids());
    (MinimaxAI::new(resolver, config), state)
}

fn attacked(ai: &MinimaxAI, state: &GameState, id: &str) -> GameState {
    let mut next = state.clone();
    ai.resolver().attack(&mut next, &MoveId::new(id)).unwrap();
    next
}

// =============================================================================
// Move Selection
// =============================================================================

#[test]
fn test_ai_returns_defense() {
    let (mut ai, state) = setup(SearchConfig::default());
    let state = attacked(&ai, &state, "dos");

    let choice = ai.get_best_move(&state);

    assert!(choice.is_some(), "defender with resources should have a move");
    assert!(ai.stats().nodes > 0);
    assert!(ai.stats().evaluations > 0);
}

#[test]
fn test_ai_protects_threatened_database() {
    // Both application and system attacks reach the unprotected Database; a
    // defense covering it is the only way to avoid losing next ply.
    let (mut ai, state) = setup(SearchConfig::default().with_depth(2));
    let state = attacked(&ai, &state, "phishing");

    let choice = ai.get_best_move(&state).unwrap();
    let defense = ai.resolver().catalog().defense(choice.as_str()).unwrap();

    let mut next = state.clone();
    ai.resolver().defend(&mut next, &choice).unwrap();
    assert!(next.network.nodes[1].protected, "chose {} which leaves the Database open", defense.id);
}

#[test]
fn test_search_does_not_touch_input() {
    let (mut ai, state) = setup(SearchConfig::default());
    let state = attacked(&ai, &state, "phishing");
    assert!(!state.game_over);
    let snapshot = state.clone();

    let choice = ai.get_best_move(&state);

    assert!(choice.is_some());
    assert!(ai.stats().nodes > 0);
    assert_eq!(state, snapshot);
}

#[test]
fn test_search_deterministic() {
    let (mut first, state) = setup(SearchConfig::default());
    let (mut second, _) = setup(SearchConfig::default());
    let state = attacked(&first, &state, "brute");

    assert_eq!(first.get_best_move(&state), second.get_best_move(&state));
}

// =============================================================================
// Pruning
// =============================================================================

#[test]
fn test_pruning_visits_fewer_nodes() {
    let (mut pruned, state) = setup(SearchConfig::default().with_depth(3));
    let (mut full, _) = setup(SearchConfig::default().with_depth(3).with_alpha_beta(false));
    let state = attacked(&pruned, &state, "dos");

    let a = pruned.get_best_move(&state);
    let b = full.get_best_move(&state);

    assert_eq!(a, b);
    assert!(pruned.stats().nodes <= full.stats().nodes);
    assert_eq!(full.stats().cutoffs, 0);
}

#[test]
fn test_terminal_state_scores() {
    let (mut ai, state) = setup(SearchConfig::default());
    let mut won = state.clone();
    won.finish(Side::Defender);

    assert_eq!(ai.minimax(&won, 3, true, f64::NEG_INFINITY, f64::INFINITY), f64::INFINITY);
    assert_eq!(ai.get_best_move(&won), None);
}
