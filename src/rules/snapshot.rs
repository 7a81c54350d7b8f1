//! Serializable view of an engine, for re-rendering after any command.

use serde::{Deserialize, Serialize};

use super::outcome::GameResult;
use super::turn::Phase;
use crate::cards::Archetype;
use crate::core::{CardId, GameState, Side, SideMap};
use crate::effects::TargetingRequest;

/// A card as shown to the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub archetype: Archetype,
}

impl CardView {
    /// Views for a list of cards, skipping unknown ids.
    #[must_use]
    pub fn list(state: &GameState, ids: &[CardId]) -> Vec<CardView> {
        ids.iter()
            .filter_map(|&id| {
                state.archetype_of(id).map(|archetype| CardView { id, archetype })
            })
            .collect()
    }
}

/// The outstanding target choice, if any.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetingView {
    pub owner: Side,
    pub count: usize,
    pub source: Archetype,
    pub eligible: Vec<CardId>,
    pub selected: Vec<CardId>,
    /// Can the selection be confirmed now?
    pub can_confirm: bool,
}

impl From<&TargetingRequest> for TargetingView {
    fn from(request: &TargetingRequest) -> Self {
        Self {
            owner: request.owner,
            count: request.count,
            source: request.source.archetype,
            eligible: request.eligible().to_vec(),
            selected: request.selected().to_vec(),
            can_confirm: !request.selected().is_empty(),
        }
    }
}

/// Full engine state for presentation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Zero-based turn index.
    pub turn_index: u8,
    /// One-based turn number, capped at `total_turns`.
    pub turn_number: u16,
    pub total_turns: u8,
    pub current_side: Side,
    pub phase: Phase,
    pub played_this_turn: bool,
    /// Would `EndTurn` be accepted now?
    pub can_end_turn: bool,
    /// Would `SkipTurn` be accepted now?
    pub can_skip: bool,
    pub deck_size: usize,
    pub hands: SideMap<Vec<CardView>>,
    pub fields: SideMap<Vec<CardView>>,
    pub destroyed: usize,
    pub pending_effects: usize,
    pub targeting: Option<TargetingView>,
    pub result: Option<GameResult>,
}

impl GameSnapshot {
    /// Cards in one side's hand.
    #[must_use]
    pub fn hand_size(&self, side: Side) -> usize {
        self.hands[side].len()
    }

    /// Cards on one side's field.
    #[must_use]
    pub fn field_size(&self, side: Side) -> usize {
        self.fields[side].len()
    }
}
