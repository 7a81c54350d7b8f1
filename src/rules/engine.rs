//! The turn engine.
//!
//! `Engine` owns one game: board, effect queue, turn state, the outstanding
//! target choice, the event log, and the opponent policy. It is driven from
//! outside:
//!
//! - the controlled side's UI sends commands (`play_card`, `end_turn`,
//!   target selection, ...)
//! - a driver calls `advance` to let the opponent take one step, sleeping
//!   between steps for presentation if it wants to
//!
//! Every call returns a [`Progress`] saying what the engine waits for next.
//! The engine itself never sleeps or spawns anything.
//!
//! ## Turn cycle
//!
//! `StartTurn` applies in-play passives and the per-turn draw, `Play` waits
//! for one card, `Resolve` drains the effect queue. Draining may stop on a
//! target choice (`Targeting`); completing the choice destroys the chosen
//! cards and drains again. After the last turn the engine scores the fields
//! and enters `GameOver` in the same call.
//!
//! ```
//! use deck_cadence::core::GameConfig;
//! use deck_cadence::rules::{Engine, Progress};
//!
//! let mut engine = Engine::new(GameConfig::default().with_seed(42)).unwrap();
//! assert_eq!(engine.start_new_game(), Ok(Progress::AwaitingPlayer));
//!
//! let snapshot = engine.snapshot();
//! assert_eq!(snapshot.turn_number, 1);
//! assert_eq!(snapshot.deck_size, 5);
//! ```

use tracing::{debug, info};

use super::outcome::GameResult;
use super::snapshot::{CardView, GameSnapshot, TargetingView};
use super::turn::{Phase, Progress, TurnLock, TurnState};
use crate::cards::{get_definition, CardInstance};
use crate::core::{
    CardId, Command, ConfigError, GameConfig, GameRng, GameState, Rejection, Side, SideMap,
};
use crate::effects::{Effect, EffectResolver, ResolverContext, TargetingRequest};
use crate::events::{EventLog, GameEvent, LogRecord};
use crate::opponent::{policy_for, OpponentPolicy};
use crate::stack::{EffectQueue, ResolutionStatus};
use crate::zones::Zone;

/// Context name of the RNG stream used for opponent decisions.
const OPPONENT_STREAM: &str = "opponent";

/// One game of the duel.
#[derive(Debug)]
pub struct Engine {
    config: GameConfig,
    state: GameState,
    queue: EffectQueue,
    turn: TurnState,
    lock: TurnLock,
    targeting: Option<TargetingRequest>,
    log: EventLog,
    policy: Box<dyn OpponentPolicy>,
    policy_rng: GameRng,
    result: Option<GameResult>,
}

impl Engine {
    /// Create an engine with no game in progress.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(config.seed.unwrap_or(0));
        Ok(Self::assemble(config, state, TurnState::idle()))
    }

    /// Create an engine at the play step of `turn_index` over a prepared
    /// board. Start-of-turn effects for that turn are not applied.
    ///
    /// Useful for setting up specific situations.
    pub fn resume_at(config: GameConfig, state: GameState, turn_index: u8) -> Result<Self, ConfigError> {
        config.validate()?;
        if turn_index >= config.total_turns {
            return Err(ConfigError::TurnOutOfRange {
                index: turn_index,
                total: config.total_turns,
            });
        }

        let mut turn = TurnState::new(turn_index);
        turn.phase = Phase::Play;
        let mut engine = Self::assemble(config, state, turn);
        engine.log.set_turn(turn_index);
        Ok(engine)
    }

    fn assemble(config: GameConfig, state: GameState, turn: TurnState) -> Self {
        let policy = policy_for(&config.opponent);
        let policy_rng = state.rng.for_context(OPPONENT_STREAM);
        Self {
            config,
            state,
            queue: EffectQueue::new(),
            turn,
            lock: TurnLock::new(),
            targeting: None,
            log: EventLog::new(),
            policy,
            policy_rng,
            result: None,
        }
    }

    /// Replace the opponent policy.
    #[must_use]
    pub fn with_policy(mut self, policy: Box<dyn OpponentPolicy>) -> Self {
        self.policy = policy;
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.turn.phase
    }

    #[must_use]
    pub fn current_side(&self) -> Side {
        self.turn.side
    }

    /// Seed of the current game.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.state.rng.seed()
    }

    /// The outstanding target choice, if any.
    #[must_use]
    pub fn targeting(&self) -> Option<&TargetingRequest> {
        self.targeting.as_ref()
    }

    #[must_use]
    pub fn queue(&self) -> &EffectQueue {
        &self.queue
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Every logged event, in order.
    pub fn events(&self) -> impl Iterator<Item = &GameEvent> {
        self.log.events()
    }

    /// Log records with `sequence >= from`.
    pub fn events_since(&self, from: u64) -> impl Iterator<Item = &LogRecord> {
        self.log.since(from)
    }

    /// Is turn advancement in progress?
    #[must_use]
    pub fn is_advancing(&self) -> bool {
        self.lock.is_held()
    }

    /// What the engine is waiting for, without doing anything.
    #[must_use]
    pub fn progress(&self) -> Progress {
        if let Some(result) = self.result {
            return Progress::Finished(result);
        }
        if self.turn.phase == Phase::Idle {
            return Progress::NotStarted;
        }
        if let Some(request) = &self.targeting {
            return Progress::AwaitingTargets {
                owner: request.owner,
            };
        }
        match self.turn.side {
            Side::Controlled => Progress::AwaitingPlayer,
            Side::Opponent => Progress::OpponentToAct,
        }
    }

    /// Full state for presentation.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let hand = |side: Side| CardView::list(&self.state, self.state.hand(side));
        let field = |side: Side| CardView::list(&self.state, self.state.field(side));
        let controlled_turn = self.is_controlled_turn();

        GameSnapshot {
            turn_index: self.turn.index,
            turn_number: self.turn.number().min(u16::from(self.config.total_turns)),
            total_turns: self.config.total_turns,
            current_side: self.turn.side,
            phase: self.turn.phase,
            played_this_turn: self.turn.played,
            can_end_turn: controlled_turn
                && (self.turn.played || self.state.hand(Side::Controlled).is_empty()),
            can_skip: controlled_turn && self.state.hand(Side::Controlled).is_empty(),
            deck_size: self.state.deck_size(),
            hands: SideMap::new(hand),
            fields: SideMap::new(field),
            destroyed: self.state.destroyed().len(),
            pending_effects: self.queue.len(),
            targeting: self.targeting.as_ref().map(TargetingView::from),
            result: self.result,
        }
    }

    fn is_controlled_turn(&self) -> bool {
        self.turn.side == Side::Controlled
            && self.targeting.is_none()
            && matches!(self.turn.phase, Phase::Play | Phase::Resolve)
    }

    // === Commands ===

    /// Dispatch a command.
    pub fn execute(&mut self, command: Command) -> Result<Progress, Rejection> {
        match command {
            Command::StartNewGame => self.start_new_game(),
            Command::PlayCard(card) => self.play_card(card),
            Command::SelectTarget(card) => self.select_target(card),
            Command::DeselectTarget(card) => self.deselect_target(card),
            Command::ToggleTarget(card) => self.toggle_target(card),
            Command::ConfirmTargets => self.confirm_targets(),
            Command::EndTurn => self.end_turn(),
            Command::SkipTurn => self.skip_turn(),
        }
    }

    /// Shuffle a fresh deck, deal both hands, and begin the first turn.
    ///
    /// Discards any game in progress.
    pub fn start_new_game(&mut self) -> Result<Progress, Rejection> {
        self.command(|engine| {
            let seed = engine.config.seed.unwrap_or_else(rand::random);
            engine.state = GameState::with_deck(seed, &engine.config.deck);
            engine.policy_rng = engine.state.rng.for_context(OPPONENT_STREAM);
            engine.queue.clear();
            engine.targeting = None;
            engine.result = None;
            engine.log.clear();

            for side in Side::BOTH {
                for _ in 0..engine.config.starting_hand {
                    engine.state.draw_to_hand(side);
                }
            }

            info!(seed, policy = engine.policy.name(), "new game");
            engine.log.push(GameEvent::GameStarted {
                seed,
                starting_hand: engine.config.starting_hand,
            });
            Ok(engine.begin_turn(0))
        })
    }

    /// Play a card from the controlled side's hand.
    pub fn play_card(&mut self, card: CardId) -> Result<Progress, Rejection> {
        self.command(|engine| {
            engine.check_controlled_turn()?;
            if engine.turn.played {
                return Err(Rejection::AlreadyPlayed);
            }
            if engine.turn.phase != Phase::Play {
                return Err(Rejection::WrongPhase {
                    phase: engine.turn.phase,
                });
            }
            if !engine.state.zones.is_in_zone(card, Zone::Hand(Side::Controlled)) {
                return Err(Rejection::NotInHand { card });
            }

            engine.put_into_play(Side::Controlled, card);
            Ok(engine.settle())
        })
    }

    /// End the controlled side's turn.
    ///
    /// Allowed after playing a card, or with an empty hand.
    pub fn end_turn(&mut self) -> Result<Progress, Rejection> {
        self.command(|engine| {
            engine.check_controlled_turn()?;
            if !engine.turn.played && !engine.state.hand(Side::Controlled).is_empty() {
                return Err(Rejection::MustPlayFirst);
            }
            if !engine.turn.played {
                engine.pass();
            }
            Ok(engine.finish_turn())
        })
    }

    /// Pass the controlled side's turn with an empty hand.
    pub fn skip_turn(&mut self) -> Result<Progress, Rejection> {
        self.command(|engine| {
            engine.check_controlled_turn()?;
            if !engine.state.hand(Side::Controlled).is_empty() {
                return Err(Rejection::HandNotEmpty);
            }
            engine.pass();
            Ok(engine.finish_turn())
        })
    }

    /// Add a card to the controlled side's target selection.
    ///
    /// A single-target request confirms immediately.
    pub fn select_target(&mut self, card: CardId) -> Result<Progress, Rejection> {
        self.command(|engine| {
            engine.player_request()?.select(card)?;
            Ok(engine.auto_confirm())
        })
    }

    /// Remove a card from the controlled side's target selection.
    pub fn deselect_target(&mut self, card: CardId) -> Result<Progress, Rejection> {
        self.command(|engine| {
            engine.player_request()?.deselect(card)?;
            Ok(engine.progress())
        })
    }

    /// Select an unselected card or deselect a selected one.
    pub fn toggle_target(&mut self, card: CardId) -> Result<Progress, Rejection> {
        self.command(|engine| {
            engine.player_request()?.toggle(card)?;
            Ok(engine.auto_confirm())
        })
    }

    /// Submit the controlled side's target selection.
    pub fn confirm_targets(&mut self) -> Result<Progress, Rejection> {
        self.command(|engine| {
            let chosen = engine.player_request()?.take_selection()?;
            Ok(engine.complete_targeting(&chosen))
        })
    }

    // === Driving ===

    /// Take one opponent step.
    ///
    /// Plays the opponent's card, drains the queue after it, or answers a
    /// target choice owned by the opponent, whichever is due. Does nothing
    /// while the controlled side has to act.
    pub fn advance(&mut self) -> Progress {
        self.guarded(|engine| engine.step_opponent())
            .unwrap_or(Progress::Dropped)
    }

    /// Call `advance` until the controlled side has to act or the game ends.
    pub fn run_until_input(&mut self) -> Progress {
        loop {
            let progress = self.advance();
            match progress {
                Progress::OpponentToAct
                | Progress::AwaitingTargets {
                    owner: Side::Opponent,
                } => continue,
                _ => return progress,
            }
        }
    }

    /// Append an effect to the queue without resolving it.
    pub fn enqueue_effect(&mut self, effect: Effect) {
        self.queue.enqueue(effect);
    }

    /// Drain the queue now.
    ///
    /// Does nothing while a target choice is outstanding or the game is not
    /// running.
    pub fn resolve_queue(&mut self) -> Progress {
        self.guarded(|engine| {
            if engine.targeting.is_some() || engine.result.is_some() {
                return engine.progress();
            }
            if engine.turn.phase == Phase::Idle {
                return Progress::NotStarted;
            }
            engine.settle()
        })
        .unwrap_or(Progress::Dropped)
    }

    // === Internals ===

    /// Run `f` under the advancement lock. Returns `None` if it is held.
    fn guarded<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> Option<T> {
        if !self.lock.try_acquire() {
            debug!("advancement in progress, request dropped");
            return None;
        }
        let out = f(self);
        self.lock.release();
        Some(out)
    }

    /// Run a controlled-side command, logging any rejection.
    fn command(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<Progress, Rejection>,
    ) -> Result<Progress, Rejection> {
        let outcome = self.guarded(f).unwrap_or(Ok(Progress::Dropped));
        if let Err(reason) = &outcome {
            debug!(%reason, "command rejected");
            self.log.push(GameEvent::Rejected {
                reason: reason.clone(),
            });
        }
        outcome
    }

    /// Common preconditions for play, end, and skip.
    fn check_controlled_turn(&self) -> Result<(), Rejection> {
        if self.turn.phase == Phase::Idle {
            return Err(Rejection::NotStarted);
        }
        if self.result.is_some() {
            return Err(Rejection::GameOver);
        }
        if self.targeting.is_some() {
            return Err(Rejection::TargetingInProgress);
        }
        if self.turn.side != Side::Controlled {
            return Err(Rejection::NotYourTurn);
        }
        Ok(())
    }

    /// The outstanding request, if the controlled side owns it.
    fn player_request(&mut self) -> Result<&mut TargetingRequest, Rejection> {
        if self.turn.phase == Phase::Idle {
            return Err(Rejection::NotStarted);
        }
        if self.result.is_some() {
            return Err(Rejection::GameOver);
        }
        let request = self
            .targeting
            .as_mut()
            .ok_or(Rejection::NoTargetingRequest)?;
        if request.owner != Side::Controlled {
            return Err(Rejection::NotYourChoice);
        }
        Ok(request)
    }

    fn auto_confirm(&mut self) -> Progress {
        let ready = self
            .targeting
            .as_ref()
            .is_some_and(TargetingRequest::should_auto_confirm);
        if !ready {
            return self.progress();
        }
        let chosen = self
            .targeting
            .as_ref()
            .map(|request| request.selected().to_vec())
            .unwrap_or_default();
        self.complete_targeting(&chosen)
    }

    fn step_opponent(&mut self) -> Progress {
        if self.result.is_some() || self.turn.phase == Phase::Idle {
            return self.progress();
        }
        if let Some(owner) = self.targeting.as_ref().map(|request| request.owner) {
            return match owner {
                Side::Opponent => self.answer_opponent_targeting(),
                Side::Controlled => self.progress(),
            };
        }
        if self.turn.side != Side::Opponent {
            return self.progress();
        }

        match self.turn.phase {
            Phase::Play => self.opponent_play(),
            _ => self.settle(),
        }
    }

    fn opponent_play(&mut self) -> Progress {
        let hand: Vec<CardInstance> = self
            .state
            .hand(Side::Opponent)
            .iter()
            .filter_map(|&id| self.state.get_card(id).cloned())
            .collect();

        let choice = self
            .policy
            .choose_card(&hand, &mut self.policy_rng)
            .filter(|id| hand.iter().any(|card| card.id == *id))
            .or_else(|| hand.first().map(|card| card.id));

        match choice {
            Some(card) => {
                self.put_into_play(Side::Opponent, card);
                Progress::OpponentToAct
            }
            None => {
                self.log.push(GameEvent::CannotPlay {
                    side: Side::Opponent,
                });
                self.turn.passed = true;
                self.finish_turn()
            }
        }
    }

    fn answer_opponent_targeting(&mut self) -> Progress {
        let Some(request) = &self.targeting else {
            return self.progress();
        };
        let pool = request.candidates(&self.state);
        let chosen = self.policy.choose_targets(
            request.owner,
            request.count,
            &pool,
            &mut self.policy_rng,
        );
        self.complete_targeting(&chosen)
    }

    /// Move a card from hand to field and enqueue its entry effect.
    fn put_into_play(&mut self, side: Side, card: CardId) {
        self.state.move_card(card, Zone::Field(side));
        self.turn.played = true;
        self.turn.phase = Phase::Resolve;

        let Some(instance) = self.state.get_card(card) else {
            return;
        };
        let archetype = instance.archetype;
        let entry = get_definition(archetype).entry_effect(side, instance);

        self.log.push(GameEvent::Played {
            side,
            card,
            archetype,
        });
        if let Some(effect) = entry {
            self.queue.enqueue(effect);
        }
    }

    fn pass(&mut self) {
        self.turn.passed = true;
        self.log.push(GameEvent::TurnSkipped {
            side: self.turn.side,
        });
    }

    /// Finish the outstanding request with `chosen` and keep draining.
    fn complete_targeting(&mut self, chosen: &[CardId]) -> Progress {
        let Some(request) = self.targeting.take() else {
            return self.progress();
        };
        self.turn.phase = Phase::Resolve;

        let mut ctx = ResolverContext::new(&mut self.state, &mut self.queue, &mut self.log);
        request.complete(&mut ctx, chosen);
        self.settle()
    }

    /// Drain the queue, then decide what happens next.
    fn settle(&mut self) -> Progress {
        self.turn.phase = Phase::Resolve;
        match self.queue.drain(&mut self.state, &mut self.log) {
            ResolutionStatus::AwaitingTargets(request) => {
                assert!(
                    self.targeting.is_none(),
                    "a target choice is already outstanding"
                );
                let owner = request.owner;
                self.targeting = Some(request);
                self.turn.phase = Phase::Targeting;
                Progress::AwaitingTargets { owner }
            }
            ResolutionStatus::Complete => match self.turn.side {
                Side::Controlled => {
                    if !self.turn.played {
                        self.turn.phase = Phase::Play;
                    }
                    Progress::AwaitingPlayer
                }
                Side::Opponent if self.turn.is_done() => self.finish_turn(),
                Side::Opponent => {
                    self.turn.phase = Phase::Play;
                    Progress::OpponentToAct
                }
            },
        }
    }

    /// Start the next turn, or end the game after the last one.
    fn finish_turn(&mut self) -> Progress {
        debug_assert_eq!(self.state.accounted_cards(), self.state.total_cards());

        let next = self.turn.index.saturating_add(1);
        if next >= self.config.total_turns {
            return self.finish_game();
        }
        self.begin_turn(next)
    }

    fn begin_turn(&mut self, index: u8) -> Progress {
        self.turn = TurnState::new(index);
        self.log.set_turn(index);
        let side = self.turn.side;

        info!(turn = self.turn.number(), %side, "turn started");
        self.log.push(GameEvent::TurnStarted { turn: index, side });

        self.apply_passives(side);
        let mut ctx = ResolverContext::new(&mut self.state, &mut self.queue, &mut self.log);
        EffectResolver::draw(&mut ctx, side, self.config.draws_per_turn);

        self.turn.phase = Phase::Play;
        match side {
            Side::Controlled => Progress::AwaitingPlayer,
            Side::Opponent => Progress::OpponentToAct,
        }
    }

    /// Apply start-of-turn passives from `side`'s field, once per archetype.
    fn apply_passives(&mut self, side: Side) {
        let mut seen = Vec::new();
        let mut extra_draws = Vec::new();

        for &id in self.state.field(side) {
            let Some(card) = self.state.get_card(id) else {
                continue;
            };
            if seen.contains(&card.archetype) {
                continue;
            }
            seen.push(card.archetype);

            if let Some(Effect::ExtraDrawStartTurn { count, source, .. }) =
                get_definition(card.archetype).passive_effect(side, card)
            {
                extra_draws.push((source.archetype, count));
            }
        }

        for (archetype, count) in extra_draws {
            self.log.push(GameEvent::PassiveTriggered {
                side,
                archetype,
                count,
            });
            let mut ctx = ResolverContext::new(&mut self.state, &mut self.queue, &mut self.log);
            EffectResolver::draw(&mut ctx, side, count);
        }
    }

    fn finish_game(&mut self) -> Progress {
        let result = GameResult::from_state(&self.state);
        self.result = Some(result);
        self.turn.phase = Phase::GameOver;

        info!(
            controlled = result.controlled,
            opponent = result.opponent,
            outcome = ?result.outcome,
            "game over"
        );
        self.log.push(GameEvent::GameOver { result });
        Progress::Finished(result)
    }
}
