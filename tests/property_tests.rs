//! Whole-game properties over random seeds.

mod common;

use common::{play_out, uniform_config};
use deck_cadence::core::{GameConfig, GameRng, Side};
use deck_cadence::events::GameEvent;
use deck_cadence::rules::{Engine, GameResult, Phase};
use proptest::prelude::*;

fn finished_game(seed: u64, player_seed: u64, weighted: bool) -> (Engine, GameResult) {
    let config = if weighted {
        GameConfig::default().with_seed(seed)
    } else {
        uniform_config(seed)
    };
    let mut engine = Engine::new(config).unwrap();
    let mut rng = GameRng::new(player_seed);
    engine.start_new_game().unwrap();
    let result = play_out(&mut engine, &mut rng);
    (engine, result)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_every_game_runs_eight_turns(seed in any::<u64>(), player in any::<u64>(), weighted in any::<bool>()) {
        let (engine, result) = finished_game(seed, player, weighted);

        let turns: Vec<(u8, Side)> = engine
            .events()
            .filter_map(|e| match e {
                GameEvent::TurnStarted { turn, side } => Some((*turn, *side)),
                _ => None,
            })
            .collect();
        prop_assert_eq!(turns.len(), 8);
        for (index, (turn, side)) in turns.into_iter().enumerate() {
            prop_assert_eq!(usize::from(turn), index);
            prop_assert_eq!(side, Side::for_turn(turn));
        }

        prop_assert_eq!(engine.phase(), Phase::GameOver);
        prop_assert_eq!(result, GameResult::from_state(engine.state()));
        prop_assert!(engine.targeting().is_none());
        prop_assert!(engine.queue().is_empty());
    }

    #[test]
    fn prop_cards_are_conserved(seed in any::<u64>(), player in any::<u64>()) {
        let (engine, _) = finished_game(seed, player, true);
        let state = engine.state();

        let located = state.deck_size()
            + state.hand(Side::Controlled).len()
            + state.hand(Side::Opponent).len()
            + state.field(Side::Controlled).len()
            + state.field(Side::Opponent).len()
            + state.destroyed().len();
        prop_assert_eq!(located, 10);
        prop_assert_eq!(state.total_cards(), 10);

        let destroyed = engine
            .events()
            .filter(|e| matches!(e, GameEvent::Destroyed { .. }))
            .count();
        prop_assert_eq!(destroyed, state.destroyed().len());
    }

    #[test]
    fn prop_draws_match_deck(seed in any::<u64>(), player in any::<u64>()) {
        let (engine, _) = finished_game(seed, player, false);

        // Setup deals silently; every later draw is logged
        let logged: usize = engine
            .events()
            .map(|e| match e {
                GameEvent::Drew { count, .. } => *count,
                _ => 0,
            })
            .sum();
        prop_assert_eq!(logged + 4 + engine.state().deck_size(), 10);
    }

    #[test]
    fn prop_opening_deal(seed in any::<u64>(), hand in 0usize..=4) {
        let config = GameConfig::default().with_seed(seed).with_starting_hand(hand);
        let mut engine = Engine::new(config).unwrap();
        engine.start_new_game().unwrap();

        prop_assert_eq!(engine.state().hand(Side::Controlled).len(), hand + 1);
        prop_assert_eq!(engine.state().hand(Side::Opponent).len(), hand);
        prop_assert_eq!(engine.state().deck_size(), 10 - 2 * hand - 1);
        prop_assert_eq!(engine.seed(), seed);
    }
}
