//! Opponent turn and policy integration tests.

mod common;

use common::{count_events, Board};
use deck_cadence::cards::Archetype;
use deck_cadence::core::{CardId, GameConfig, OpponentConfig, Side};
use deck_cadence::effects::{Effect, EffectSource};
use deck_cadence::events::GameEvent;
use deck_cadence::opponent::WeightedOpponent;
use deck_cadence::rules::{Engine, Progress};
use deck_cadence::zones::Zone;

/// Controlled Robin on the field, opponent holding `opponent_hand` cards,
/// and an opponent destroy effect about to resolve.
fn robin_under_fire(opponent_hand: usize) -> (Engine, CardId) {
    let mut board = Board::new();
    let robin = board.put(Archetype::Robin, Zone::Hand(Side::Controlled));
    board.put(Archetype::Val, Zone::Hand(Side::Controlled));
    board.put_many(Archetype::Val, Zone::Hand(Side::Opponent), opponent_hand);
    let mut engine = board.resume(0);

    assert_eq!(engine.play_card(robin), Ok(Progress::AwaitingPlayer));
    engine.enqueue_effect(Effect::destroy_choose(
        Side::Opponent,
        1,
        EffectSource::new(Archetype::Mime, CardId(999)),
    ));
    assert_eq!(
        engine.resolve_queue(),
        Progress::AwaitingTargets {
            owner: Side::Opponent
        }
    );
    (engine, robin)
}

#[test]
fn test_robin_last_breath_steals_two() {
    let (mut engine, robin) = robin_under_fire(3);

    assert_eq!(engine.advance(), Progress::AwaitingPlayer);
    assert_eq!(engine.state().destroyed(), &[robin]);
    assert_eq!(engine.state().hand(Side::Controlled).len(), 3);
    assert_eq!(engine.state().hand(Side::Opponent).len(), 1);
    assert_eq!(
        engine.events().last(),
        Some(&GameEvent::Stole {
            side: Side::Controlled,
            from: Side::Opponent,
            count: 2
        })
    );

    // Stolen cards change owner
    for &id in engine.state().hand(Side::Controlled) {
        assert_eq!(
            engine.state().get_card(id).unwrap().owner,
            Some(Side::Controlled)
        );
    }
}

#[test]
fn test_robin_steals_what_is_there() {
    let (mut engine, _) = robin_under_fire(1);

    engine.advance();
    assert!(engine.state().hand(Side::Opponent).is_empty());
    assert_eq!(
        engine.events().last(),
        Some(&GameEvent::Stole {
            side: Side::Controlled,
            from: Side::Opponent,
            count: 1
        })
    );
}

#[test]
fn test_robin_steal_from_empty_hand_fizzles() {
    let (mut engine, _) = robin_under_fire(0);

    engine.advance();
    assert_eq!(engine.state().hand(Side::Controlled).len(), 1);
    assert_eq!(
        engine.events().last(),
        Some(&GameEvent::StealFizzled {
            side: Side::Controlled,
            from: Side::Opponent
        })
    );
}

#[test]
fn test_opponent_plays_then_resolves() {
    let mut board = Board::new();
    board.put_many(Archetype::Val, Zone::Deck, 4);
    let val = board.put(Archetype::Val, Zone::Hand(Side::Opponent));
    let mut engine = board.resume(1);

    // Playing and draining are separate steps
    assert_eq!(engine.advance(), Progress::OpponentToAct);
    assert_eq!(engine.state().field(Side::Opponent), &[val]);
    assert_eq!(engine.queue().len(), 1);

    assert_eq!(engine.advance(), Progress::AwaitingPlayer);
    assert_eq!(engine.state().hand(Side::Opponent).len(), 2);
    assert_eq!(engine.turn().index, 2);
    assert_eq!(engine.current_side(), Side::Controlled);
    // Turn draw for the controlled side
    assert_eq!(engine.state().hand(Side::Controlled).len(), 1);
}

#[test]
fn test_opponent_with_empty_hand_cannot_play() {
    let mut board = Board::new();
    board.put_many(Archetype::Val, Zone::Deck, 2);
    let mut engine = board.resume(3);

    assert_eq!(engine.advance(), Progress::AwaitingPlayer);
    assert_eq!(
        count_events(&engine, |e| *e
            == GameEvent::CannotPlay {
                side: Side::Opponent
            }),
        1
    );
    assert_eq!(engine.turn().index, 4);
}

#[test]
fn test_advance_waits_for_player() {
    let mut board = Board::new();
    board.put(Archetype::Val, Zone::Hand(Side::Controlled));
    let mut engine = board.resume(0);

    let before = engine.snapshot();
    assert_eq!(engine.advance(), Progress::AwaitingPlayer);
    assert_eq!(engine.run_until_input(), Progress::AwaitingPlayer);
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_weighted_opponent_finishes_its_turns() {
    for seed in 0..20 {
        let mut engine = Engine::new(GameConfig::default().with_seed(seed)).unwrap();
        engine.start_new_game().unwrap();
        let card = engine.state().hand(Side::Controlled)[0];
        // Nothing else is on the field yet, so no target choice opens
        assert_eq!(engine.play_card(card), Ok(Progress::AwaitingPlayer));
        let progress = engine.end_turn().unwrap();

        let settled = engine.run_until_input();
        assert!(
            settled.needs_player() || settled.is_finished(),
            "seed {seed}: {settled:?} after {progress:?}"
        );
        assert_eq!(
            engine.state().accounted_cards(),
            engine.state().total_cards()
        );
    }
}

#[test]
fn test_custom_policy_is_used() {
    let config = GameConfig::default().with_seed(3);
    let weights = deck_cadence::core::ArchetypeWeights::flat();
    let policy = WeightedOpponent::new(OpponentConfig::default().with_weights(weights));
    let mut engine = Engine::new(config).unwrap().with_policy(Box::new(policy));

    assert_eq!(engine.start_new_game(), Ok(Progress::AwaitingPlayer));
}
