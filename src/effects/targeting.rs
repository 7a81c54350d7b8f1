//! Target selection for destroy effects.
//!
//! A `TargetingRequest` is the suspended remainder of a `DestroyChoose`
//! effect. The queue drain returns it instead of resolving the effect; the
//! engine holds it until the owner's choice arrives, then calls
//! [`TargetingRequest::complete`] and drains again.
//!
//! The controlled side builds its choice with `select`/`deselect`/`toggle`
//! and `take_selection`. The opponent's choice comes from its policy over
//! [`TargetingRequest::candidates`].

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::effect::EffectSource;
use super::resolver::{EffectResolver, ResolverContext};
use crate::cards::Archetype;
use crate::core::{CardId, GameState, Rejection, Side};

/// A field card that can be targeted, with where it sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetCandidate {
    pub id: CardId,
    /// Field the card is on.
    pub side: Side,
    pub archetype: Archetype,
}

/// An outstanding "choose up to N field cards" request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetingRequest {
    /// Side making the choice.
    pub owner: Side,
    /// Maximum number of cards to choose.
    pub count: usize,
    /// Effect the choice belongs to.
    pub source: EffectSource,
    eligible: Vec<CardId>,
    selected: SmallVec<[CardId; 4]>,
}

impl TargetingRequest {
    /// Create a request over a fixed set of eligible cards.
    #[must_use]
    pub fn new(owner: Side, count: usize, source: EffectSource, eligible: Vec<CardId>) -> Self {
        Self {
            owner,
            count,
            source,
            eligible,
            selected: SmallVec::new(),
        }
    }

    /// Cards that may be chosen.
    #[must_use]
    pub fn eligible(&self) -> &[CardId] {
        &self.eligible
    }

    /// Cards currently selected, in selection order.
    #[must_use]
    pub fn selected(&self) -> &[CardId] {
        &self.selected
    }

    #[must_use]
    pub fn is_eligible(&self, card: CardId) -> bool {
        self.eligible.contains(&card)
    }

    #[must_use]
    pub fn is_selected(&self, card: CardId) -> bool {
        self.selected.contains(&card)
    }

    /// Eligible cards with their side and archetype.
    #[must_use]
    pub fn candidates(&self, state: &GameState) -> Vec<TargetCandidate> {
        self.eligible
            .iter()
            .filter_map(|&id| {
                let side = state.zones.get_zone(id)?.side()?;
                let archetype = state.archetype_of(id)?;
                Some(TargetCandidate { id, side, archetype })
            })
            .collect()
    }

    /// Add a card to the selection. Selecting a selected card is a no-op.
    pub fn select(&mut self, card: CardId) -> Result<(), Rejection> {
        if !self.is_eligible(card) {
            return Err(Rejection::NotTargetable { card });
        }
        if self.is_selected(card) {
            return Ok(());
        }
        if self.selected.len() >= self.count {
            return Err(Rejection::SelectionFull { max: self.count });
        }
        self.selected.push(card);
        Ok(())
    }

    /// Remove a card from the selection.
    pub fn deselect(&mut self, card: CardId) -> Result<(), Rejection> {
        let index = self
            .selected
            .iter()
            .position(|&c| c == card)
            .ok_or(Rejection::NotSelected { card })?;
        self.selected.remove(index);
        Ok(())
    }

    /// Flip a card's selection. Returns whether it is now selected.
    pub fn toggle(&mut self, card: CardId) -> Result<bool, Rejection> {
        if self.is_selected(card) {
            self.deselect(card)?;
            Ok(false)
        } else {
            self.select(card)?;
            Ok(true)
        }
    }

    /// Single-card requests confirm as soon as the card is picked.
    #[must_use]
    pub fn should_auto_confirm(&self) -> bool {
        self.count == 1 && self.selected.len() == 1
    }

    /// The confirmed selection. Requires at least one card.
    pub fn take_selection(&mut self) -> Result<Vec<CardId>, Rejection> {
        if self.selected.is_empty() {
            return Err(Rejection::NothingSelected);
        }
        Ok(std::mem::take(&mut self.selected).into_vec())
    }

    /// Finish the suspended effect: destroy `chosen` as one batch.
    ///
    /// Cards outside the eligible set are ignored and at most `count` are
    /// used. Returns the number of cards destroyed.
    pub fn complete(self, ctx: &mut ResolverContext<'_>, chosen: &[CardId]) -> usize {
        let targets: SmallVec<[CardId; 4]> = chosen
            .iter()
            .copied()
            .filter(|&card| self.is_eligible(card))
            .take(self.count)
            .collect();
        EffectResolver::destroy_batch(ctx, self.owner, &targets)
    }
}
