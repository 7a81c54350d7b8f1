//! Helpers shared by the integration tests.

#![allow(dead_code)]

use deck_cadence::cards::Archetype;
use deck_cadence::core::{CardId, Command, GameConfig, GameRng, GameState, OpponentConfig, Side};
use deck_cadence::events::GameEvent;
use deck_cadence::opponent::{OpponentPolicy, UniformOpponent};
use deck_cadence::rules::{Engine, GameResult, Progress};
use deck_cadence::zones::Zone;

/// Default config with a fixed seed and a uniform opponent.
pub fn uniform_config(seed: u64) -> GameConfig {
    GameConfig::default()
        .with_seed(seed)
        .with_opponent(OpponentConfig::uniform())
}

/// Board builder for hand-made situations.
pub struct Board {
    pub state: GameState,
}

impl Board {
    pub fn new() -> Self {
        Self {
            state: GameState::new(17),
        }
    }

    pub fn put(&mut self, archetype: Archetype, zone: Zone) -> CardId {
        self.state.insert_card(archetype, zone)
    }

    pub fn put_many(&mut self, archetype: Archetype, zone: Zone, n: usize) -> Vec<CardId> {
        (0..n).map(|_| self.put(archetype, zone)).collect()
    }

    /// Engine at the play step of `turn` with a uniform opponent.
    pub fn resume(self, turn: u8) -> Engine {
        Engine::resume_at(uniform_config(17), self.state, turn).unwrap()
    }
}

/// Play one game to the end, the controlled side choosing uniformly.
pub fn play_out(engine: &mut Engine, rng: &mut GameRng) -> GameResult {
    let player = UniformOpponent;
    let mut progress = engine.progress();

    for _ in 0..500 {
        progress = match progress {
            Progress::Finished(result) => return result,
            Progress::NotStarted => engine.start_new_game().unwrap(),
            Progress::AwaitingTargets {
                owner: Side::Controlled,
            } => {
                let request = engine.targeting().unwrap();
                let pool = request.candidates(engine.state());
                let single = request.count == 1;
                let picks = player.choose_targets(request.owner, request.count, &pool, rng);
                assert!(!picks.is_empty());
                let mut last = engine.progress();
                for card in picks {
                    last = engine.select_target(card).unwrap();
                }
                // Single-card requests confirm on selection
                if !single {
                    last = engine.confirm_targets().unwrap();
                }
                last
            }
            Progress::AwaitingPlayer if !engine.turn().played => {
                let hand: Vec<_> = engine
                    .state()
                    .hand(Side::Controlled)
                    .iter()
                    .map(|&id| engine.state().get_card(id).unwrap().clone())
                    .collect();
                match player.choose_card(&hand, rng) {
                    Some(card) => engine.execute(Command::PlayCard(card)).unwrap(),
                    None => engine.skip_turn().unwrap(),
                }
            }
            Progress::AwaitingPlayer => engine.end_turn().unwrap(),
            Progress::OpponentToAct
            | Progress::AwaitingTargets {
                owner: Side::Opponent,
            } => engine.run_until_input(),
            Progress::Dropped => panic!("no advancement should be in flight"),
        };
    }
    panic!("game did not finish");
}

/// Count events matching a predicate.
pub fn count_events(engine: &Engine, pred: impl Fn(&GameEvent) -> bool) -> usize {
    engine.events().filter(|e| pred(e)).count()
}
