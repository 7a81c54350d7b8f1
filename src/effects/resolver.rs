//! Effect resolution - applying effects to game state.
//!
//! `EffectResolver` applies one effect at a time through a
//! `ResolverContext`, which lends it the board, the effect queue (for
//! last-breath effects), and the event log. Resolution never fails:
//! exhausted resources mean fewer cards move, and the log says so.

use smallvec::SmallVec;
use tracing::trace;

use super::effect::{Effect, EffectSource};
use super::targeting::TargetingRequest;
use crate::cards::get_definition;
use crate::core::{CardId, GameState, Side};
use crate::events::{EventLog, GameEvent};
use crate::stack::EffectQueue;
use crate::zones::Zone;

/// Everything an effect may touch while resolving.
pub struct ResolverContext<'a> {
    pub state: &'a mut GameState,
    pub queue: &'a mut EffectQueue,
    pub log: &'a mut EventLog,
}

impl<'a> ResolverContext<'a> {
    pub fn new(state: &'a mut GameState, queue: &'a mut EffectQueue, log: &'a mut EventLog) -> Self {
        Self { state, queue, log }
    }
}

/// Result of resolving one effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The effect is fully applied.
    Resolved,
    /// The effect is suspended until its owner chooses targets.
    NeedsTargets(TargetingRequest),
}

/// Applies effects to game state.
pub struct EffectResolver;

impl EffectResolver {
    /// Resolve a single effect.
    pub fn resolve(ctx: &mut ResolverContext<'_>, effect: Effect) -> Resolution {
        trace!(kind = effect.kind_name(), owner = %effect.owner(), "resolving effect");

        match effect {
            Effect::Draw { owner, count, .. } | Effect::ExtraDrawStartTurn { owner, count, .. } => {
                Self::draw(ctx, owner, count);
                Resolution::Resolved
            }

            Effect::StealRandom {
                owner, from, count, ..
            } => {
                Self::steal_random(ctx, owner, from, count);
                Resolution::Resolved
            }

            Effect::DestroyChoose {
                owner,
                count,
                source,
            } => Self::request_destroy(ctx, owner, count, source),
        }
    }

    /// Draw up to `count` cards from the deck into `side`'s hand.
    ///
    /// Returns the number drawn.
    pub fn draw(ctx: &mut ResolverContext<'_>, side: Side, count: usize) -> usize {
        let mut drawn = 0;
        while drawn < count && ctx.state.draw_to_hand(side).is_some() {
            drawn += 1;
        }

        if drawn > 0 {
            ctx.log.push(GameEvent::Drew { side, count: drawn });
        } else if count > 0 {
            ctx.log.push(GameEvent::DeckEmpty { side });
        }
        drawn
    }

    /// Move up to `count` uniformly random cards from `from`'s hand into
    /// `owner`'s hand. Returns the number moved.
    pub fn steal_random(ctx: &mut ResolverContext<'_>, owner: Side, from: Side, count: usize) -> usize {
        let available = ctx.state.hand(from).len();
        if available == 0 {
            ctx.log.push(GameEvent::StealFizzled { side: owner, from });
            return 0;
        }

        let moved = count.min(available);
        for _ in 0..moved {
            let remaining = ctx.state.hand(from).len();
            let pick = ctx.state.rng.gen_range_usize(0..remaining);
            let card = ctx.state.hand(from)[pick];
            ctx.state.move_card(card, Zone::Hand(owner));
        }

        ctx.log.push(GameEvent::Stole {
            side: owner,
            from,
            count: moved,
        });
        moved
    }

    /// Open a targeting request, or fizzle if nothing can be targeted.
    ///
    /// The card that produced the effect is never a candidate.
    fn request_destroy(
        ctx: &mut ResolverContext<'_>,
        owner: Side,
        count: usize,
        source: EffectSource,
    ) -> Resolution {
        let eligible: Vec<CardId> = ctx
            .state
            .field_cards()
            .into_iter()
            .map(|(_, id)| id)
            .filter(|&id| id != source.card)
            .collect();

        if eligible.is_empty() || count == 0 {
            ctx.log.push(GameEvent::DestroyFizzled {
                side: owner,
                source: source.archetype,
            });
            return Resolution::Resolved;
        }

        ctx.log.push(GameEvent::TargetingRequested {
            owner,
            count,
            source: source.archetype,
        });
        Resolution::NeedsTargets(TargetingRequest::new(owner, count, source, eligible))
    }

    /// Destroy `targets` as one batch on behalf of `by`.
    ///
    /// Targets no longer on a field (or repeated) are skipped. Each
    /// surviving target is removed and its last-breath effect, bound to the
    /// card's owner, is enqueued before the next target is handled.
    /// Returns the number of cards destroyed.
    pub fn destroy_batch(ctx: &mut ResolverContext<'_>, by: Side, targets: &[CardId]) -> usize {
        let mut order: SmallVec<[CardId; 4]> = SmallVec::new();
        for &card in targets {
            if ctx.state.zones.is_on_field(card) && !order.contains(&card) {
                order.push(card);
            }
        }

        for &card in &order {
            let Some(Zone::Field(owner)) = ctx.state.destroy_card(card) else {
                continue;
            };
            let Some(instance) = ctx.state.get_card(card) else {
                continue;
            };
            let archetype = instance.archetype;
            let last_breath = get_definition(archetype).destruction_effect(owner, instance);

            ctx.log.push(GameEvent::Destroyed {
                by,
                card,
                archetype,
                owner,
            });
            if let Some(effect) = last_breath {
                ctx.queue.enqueue(effect);
            }
        }

        order.len()
    }
}
