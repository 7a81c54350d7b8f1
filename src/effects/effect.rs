//! Effect definitions.
//!
//! Effects are value objects produced by card triggers and consumed exactly
//! once by the resolver. The set of kinds is closed, so resolution is an
//! exhaustive `match`.

use serde::{Deserialize, Serialize};

use crate::cards::Archetype;
use crate::core::{CardId, Side};

/// Where an effect came from.
///
/// The archetype labels the effect in the log; the card id lets targeting
/// exclude the card that generated the effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectSource {
    pub archetype: Archetype,
    pub card: CardId,
}

impl EffectSource {
    #[must_use]
    pub const fn new(archetype: Archetype, card: CardId) -> Self {
        Self { archetype, card }
    }
}

/// A pending game effect.
///
/// ## Kinds
///
/// - `Draw`: move up to `count` cards from the deck into the owner's hand
/// - `StealRandom`: move up to `count` random cards from `from`'s hand
///   into the owner's hand
/// - `DestroyChoose`: the owner chooses up to `count` cards on any field
///   to destroy (suspends the engine for targeting)
/// - `ExtraDrawStartTurn`: passive granted while the source is in play;
///   evaluated at start of turn rather than flowing through the queue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Draw {
        owner: Side,
        count: usize,
        source: EffectSource,
    },

    StealRandom {
        owner: Side,
        from: Side,
        count: usize,
        source: EffectSource,
    },

    DestroyChoose {
        owner: Side,
        count: usize,
        source: EffectSource,
    },

    ExtraDrawStartTurn {
        owner: Side,
        count: usize,
        source: EffectSource,
    },
}

impl Effect {
    // === Convenience Constructors ===

    /// Draw `count` cards for `owner`.
    #[must_use]
    pub const fn draw(owner: Side, count: usize, source: EffectSource) -> Self {
        Effect::Draw { owner, count, source }
    }

    /// Steal `count` random cards from the other side's hand.
    #[must_use]
    pub const fn steal_random(owner: Side, count: usize, source: EffectSource) -> Self {
        Effect::StealRandom {
            owner,
            from: owner.opponent(),
            count,
            source,
        }
    }

    /// Let `owner` destroy up to `count` cards on any field.
    #[must_use]
    pub const fn destroy_choose(owner: Side, count: usize, source: EffectSource) -> Self {
        Effect::DestroyChoose { owner, count, source }
    }

    /// Draw `count` extra cards at the start of each of `owner`'s turns.
    #[must_use]
    pub const fn extra_draw_start_turn(owner: Side, count: usize, source: EffectSource) -> Self {
        Effect::ExtraDrawStartTurn { owner, count, source }
    }

    // === Accessors ===

    /// The side the effect acts for.
    #[must_use]
    pub const fn owner(&self) -> Side {
        match self {
            Effect::Draw { owner, .. }
            | Effect::StealRandom { owner, .. }
            | Effect::DestroyChoose { owner, .. }
            | Effect::ExtraDrawStartTurn { owner, .. } => *owner,
        }
    }

    /// Magnitude of the effect.
    #[must_use]
    pub const fn count(&self) -> usize {
        match self {
            Effect::Draw { count, .. }
            | Effect::StealRandom { count, .. }
            | Effect::DestroyChoose { count, .. }
            | Effect::ExtraDrawStartTurn { count, .. } => *count,
        }
    }

    /// What produced the effect.
    #[must_use]
    pub const fn source(&self) -> EffectSource {
        match self {
            Effect::Draw { source, .. }
            | Effect::StealRandom { source, .. }
            | Effect::DestroyChoose { source, .. }
            | Effect::ExtraDrawStartTurn { source, .. } => *source,
        }
    }

    /// Short kind name for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Effect::Draw { .. } => "draw",
            Effect::StealRandom { .. } => "steal_random",
            Effect::DestroyChoose { .. } => "destroy_choose",
            Effect::ExtraDrawStartTurn { .. } => "extra_draw_start_turn",
        }
    }

    /// Does resolving this effect require a target choice?
    #[must_use]
    pub const fn needs_targets(&self) -> bool {
        matches!(self, Effect::DestroyChoose { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> EffectSource {
        EffectSource::new(Archetype::Robin, CardId(1))
    }

    #[test]
    fn test_steal_targets_other_side() {
        let effect = Effect::steal_random(Side::Opponent, 2, source());
        match effect {
            Effect::StealRandom { owner, from, count, .. } => {
                assert_eq!(owner, Side::Opponent);
                assert_eq!(from, Side::Controlled);
                assert_eq!(count, 2);
            }
            other => panic!("unexpected effect {other:?}"),
        }
    }

    #[test]
    fn test_accessors() {
        let effect = Effect::destroy_choose(Side::Controlled, 2, source());
        assert_eq!(effect.owner(), Side::Controlled);
        assert_eq!(effect.count(), 2);
        assert_eq!(effect.source(), source());
        assert_eq!(effect.kind_name(), "destroy_choose");
        assert!(effect.needs_targets());
        assert!(!Effect::draw(Side::Controlled, 1, source()).needs_targets());
    }

    #[test]
    fn test_effect_serialization() {
        let effect = Effect::extra_draw_start_turn(Side::Opponent, 1, source());
        let json = serde_json::to_string(&effect).unwrap();
        let restored: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, restored);
    }
}
