//! Decision policies for the scripted opponent.
//!
//! A policy answers two questions: which card to play from a hand, and
//! which cards to destroy for a targeting request. Policies are pure
//! functions of their inputs and the RNG they are handed; the engine
//! applies the answers.

use crate::cards::{get_definition, CardInstance};
use crate::core::{CardId, GameRng, OpponentConfig, PolicyKind, Side};
use crate::effects::TargetCandidate;

/// Opponent decision-making.
pub trait OpponentPolicy: Send + Sync + std::fmt::Debug {
    /// Choose a card to play. Returns `None` only for an empty hand.
    fn choose_card(&self, hand: &[CardInstance], rng: &mut GameRng) -> Option<CardId>;

    /// Choose up to `count` distinct targets from `pool` for `owner`.
    fn choose_targets(
        &self,
        owner: Side,
        count: usize,
        pool: &[TargetCandidate],
        rng: &mut GameRng,
    ) -> Vec<CardId>;

    /// Short name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Build the policy named by a config.
#[must_use]
pub fn policy_for(config: &OpponentConfig) -> Box<dyn OpponentPolicy> {
    match config.kind {
        PolicyKind::Weighted => Box::new(WeightedOpponent::new(config.clone())),
        PolicyKind::Uniform => Box::new(UniformOpponent),
    }
}

/// Pick a random index among pool entries matching `keep`.
fn pick_where(
    pool: &[TargetCandidate],
    rng: &mut GameRng,
    keep: impl Fn(&TargetCandidate) -> bool,
) -> Option<usize> {
    let matching: Vec<usize> = pool
        .iter()
        .enumerate()
        .filter(|(_, candidate)| keep(candidate))
        .map(|(index, _)| index)
        .collect();
    rng.choose(&matching).copied()
}

/// Deliberately imperfect opponent.
///
/// Cards are sampled by archetype weight, each instance's weight scaled by
/// a random multiplier from the jitter band. Each target pick rolls:
/// below `random_pick` it is fully random; below `random_pick +
/// own_field_pick` it comes from the requester's own field; otherwise it
/// comes from the other field, avoiding last-breath archetypes when an
/// alternative exists.
#[derive(Clone, Debug, Default)]
pub struct WeightedOpponent {
    config: OpponentConfig,
}

impl WeightedOpponent {
    #[must_use]
    pub fn new(config: OpponentConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &OpponentConfig {
        &self.config
    }

    fn pick_target(&self, owner: Side, pool: &[TargetCandidate], rng: &mut GameRng) -> Option<usize> {
        let any = |_: &TargetCandidate| true;
        let roll = rng.gen_unit();

        if roll < self.config.random_pick {
            return pick_where(pool, rng, any);
        }

        if roll < self.config.random_pick + self.config.own_field_pick {
            return pick_where(pool, rng, |c| c.side == owner)
                .or_else(|| pick_where(pool, rng, any));
        }

        pick_where(pool, rng, |c| {
            c.side != owner && !get_definition(c.archetype).has_last_breath()
        })
        .or_else(|| pick_where(pool, rng, |c| c.side != owner))
        .or_else(|| pick_where(pool, rng, any))
    }
}

impl OpponentPolicy for WeightedOpponent {
    fn choose_card(&self, hand: &[CardInstance], rng: &mut GameRng) -> Option<CardId> {
        let weights: Vec<f32> = hand
            .iter()
            .map(|card| {
                let jitter = rng.gen_between(self.config.jitter_low, self.config.jitter_high);
                self.config.weights.get(card.archetype) * jitter
            })
            .collect();

        let index = rng
            .choose_weighted(&weights)
            .or_else(|| hand.len().checked_sub(1))?;
        Some(hand[index].id)
    }

    fn choose_targets(
        &self,
        owner: Side,
        count: usize,
        pool: &[TargetCandidate],
        rng: &mut GameRng,
    ) -> Vec<CardId> {
        let mut pool = pool.to_vec();
        let mut picks = Vec::with_capacity(count.min(pool.len()));

        for _ in 0..count {
            let Some(index) = self.pick_target(owner, &pool, rng) else {
                break;
            };
            picks.push(pool.remove(index).id);
        }
        picks
    }

    fn name(&self) -> &'static str {
        "weighted"
    }
}

/// Uniform random opponent.
///
/// Plays a uniformly random card and picks uniformly random targets.
#[derive(Clone, Copy, Debug, Default)]
pub struct UniformOpponent;

impl OpponentPolicy for UniformOpponent {
    fn choose_card(&self, hand: &[CardInstance], rng: &mut GameRng) -> Option<CardId> {
        rng.choose(hand).map(|card| card.id)
    }

    fn choose_targets(
        &self,
        _owner: Side,
        count: usize,
        pool: &[TargetCandidate],
        rng: &mut GameRng,
    ) -> Vec<CardId> {
        let mut ids: Vec<CardId> = pool.iter().map(|c| c.id).collect();
        rng.shuffle(&mut ids);
        ids.truncate(count);
        ids
    }

    fn name(&self) -> &'static str {
        "uniform"
    }
}
