//! Game state: card instances and their locations.
//!
//! `GameState` is the board: the zone manager, every card instance ever
//! created in this game (destroyed ones included, outside all zones), and
//! the deterministic RNG used for shuffling and steals.
//!
//! Turn bookkeeping, the effect queue, and targeting live in the engine;
//! this type only knows where cards are.

use rustc_hash::FxHashMap;

use super::entity::CardId;
use super::rng::GameRng;
use super::side::Side;
use crate::cards::{Archetype, CardInstance};
use crate::zones::{Zone, ZoneManager};

/// Full board state.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Zone manager for card locations.
    pub zones: ZoneManager,

    /// Card instances by id.
    cards: FxHashMap<CardId, CardInstance>,

    /// Cards removed from play by destruction, in destruction order.
    destroyed: Vec<CardId>,

    /// Deterministic RNG.
    pub rng: GameRng,

    /// Next card id to allocate.
    next_card_id: CardId,
}

impl GameState {
    /// Create an empty board.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            zones: ZoneManager::new(),
            cards: FxHashMap::default(),
            destroyed: Vec::new(),
            rng: GameRng::new(seed),
            next_card_id: CardId::FIRST,
        }
    }

    /// Create a board with the given deck list, shuffled.
    ///
    /// Cards are created in list order (`c1`, `c2`, ...) and then shuffled.
    #[must_use]
    pub fn with_deck(seed: u64, deck: &[Archetype]) -> Self {
        let mut state = Self::new(seed);
        for &archetype in deck {
            state.insert_card(archetype, Zone::Deck);
        }
        state.zones.shuffle_zone(Zone::Deck, &mut state.rng);
        state
    }

    // === Card Management ===

    /// Create a card and put it at the end of `zone`.
    ///
    /// Cards placed in a hand or on a field are owned by that side.
    pub fn insert_card(&mut self, archetype: Archetype, zone: Zone) -> CardId {
        let id = self.next_card_id;
        self.next_card_id = id.next();

        self.cards.insert(id, CardInstance::new(id, archetype, zone.side()));
        self.zones.add_to_zone(id, zone);
        id
    }

    /// Get a card instance.
    #[must_use]
    pub fn get_card(&self, id: CardId) -> Option<&CardInstance> {
        self.cards.get(&id)
    }

    /// Get a mutable card instance.
    pub fn get_card_mut(&mut self, id: CardId) -> Option<&mut CardInstance> {
        self.cards.get_mut(&id)
    }

    /// Archetype of a card, if it exists.
    #[must_use]
    pub fn archetype_of(&self, id: CardId) -> Option<Archetype> {
        self.get_card(id).map(|card| card.archetype)
    }

    /// Move a card to a side's zone, reassigning its owner to that side.
    ///
    /// Returns the zone it came from, or `None` if it was in no zone.
    pub fn move_card(&mut self, id: CardId, zone: Zone) -> Option<Zone> {
        let from = self.zones.move_to_zone(id, zone)?;
        if let (Some(side), Some(card)) = (zone.side(), self.cards.get_mut(&id)) {
            card.set_owner(side);
        }
        Some(from)
    }

    /// Move the top card of the deck into `side`'s hand.
    ///
    /// Returns the drawn card, or `None` if the deck is empty.
    pub fn draw_to_hand(&mut self, side: Side) -> Option<CardId> {
        let card = self.zones.pop_top(Zone::Deck)?;
        self.zones.add_to_zone(card, Zone::Hand(side));
        if let Some(instance) = self.cards.get_mut(&card) {
            instance.set_owner(side);
        }
        Some(card)
    }

    /// Remove a card from play. It keeps its instance but leaves every zone.
    ///
    /// Returns the zone it was removed from, or `None` if it was in none.
    pub fn destroy_card(&mut self, id: CardId) -> Option<Zone> {
        let zone = self.zones.remove(id)?;
        self.destroyed.push(id);
        Some(zone)
    }

    // === Queries ===

    /// Cards left in the shared deck.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.zones.zone_size(Zone::Deck)
    }

    /// A side's hand, in insertion order.
    #[must_use]
    pub fn hand(&self, side: Side) -> &[CardId] {
        self.zones.cards_in_zone(Zone::Hand(side))
    }

    /// A side's field, in insertion order.
    #[must_use]
    pub fn field(&self, side: Side) -> &[CardId] {
        self.zones.cards_in_zone(Zone::Field(side))
    }

    /// Every card on either field with the side it is on
    /// (controlled field first).
    #[must_use]
    pub fn field_cards(&self) -> Vec<(Side, CardId)> {
        Side::BOTH
            .into_iter()
            .flat_map(|side| self.field(side).iter().map(move |&id| (side, id)))
            .collect()
    }

    /// Is there at least one card on either field?
    #[must_use]
    pub fn any_field_occupied(&self) -> bool {
        Side::BOTH.into_iter().any(|side| !self.field(side).is_empty())
    }

    /// Cards destroyed so far, in destruction order.
    #[must_use]
    pub fn destroyed(&self) -> &[CardId] {
        &self.destroyed
    }

    /// Cards created in this game (in a zone or destroyed).
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    /// Cards in any zone plus destroyed cards. Always equals `total_cards`.
    #[must_use]
    pub fn accounted_cards(&self) -> usize {
        self.zones.total_cards() + self.destroyed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::DECK_LIST;

    #[test]
    fn test_with_deck() {
        let state = GameState::with_deck(42, &DECK_LIST);

        assert_eq!(state.deck_size(), 10);
        assert_eq!(state.total_cards(), 10);
        assert!(state.hand(Side::Controlled).is_empty());
        for &id in state.zones.cards_in_zone(Zone::Deck) {
            assert!(state.get_card(id).unwrap().is_unowned());
        }
    }

    #[test]
    fn test_same_seed_same_deck_order() {
        let a = GameState::with_deck(7, &DECK_LIST);
        let b = GameState::with_deck(7, &DECK_LIST);
        assert_eq!(
            a.zones.cards_in_zone(Zone::Deck),
            b.zones.cards_in_zone(Zone::Deck)
        );
    }

    #[test]
    fn test_insert_assigns_owner_from_zone() {
        let mut state = GameState::new(1);
        let a = state.insert_card(Archetype::Mime, Zone::Hand(Side::Opponent));
        let b = state.insert_card(Archetype::Val, Zone::Deck);

        assert_eq!(a, CardId(1));
        assert_eq!(b, CardId(2));
        assert_eq!(state.get_card(a).unwrap().owner, Some(Side::Opponent));
        assert_eq!(state.get_card(b).unwrap().owner, None);
    }

    #[test]
    fn test_move_card_reassigns_owner() {
        let mut state = GameState::new(1);
        let id = state.insert_card(Archetype::Robin, Zone::Hand(Side::Opponent));

        assert_eq!(
            state.move_card(id, Zone::Hand(Side::Controlled)),
            Some(Zone::Hand(Side::Opponent))
        );
        assert_eq!(state.get_card(id).unwrap().owner, Some(Side::Controlled));
    }

    #[test]
    fn test_draw_to_hand_takes_top() {
        let mut state = GameState::new(1);
        state.insert_card(Archetype::Mime, Zone::Deck);
        let top = state.insert_card(Archetype::Val, Zone::Deck);

        assert_eq!(state.draw_to_hand(Side::Opponent), Some(top));
        assert_eq!(state.get_card(top).unwrap().owner, Some(Side::Opponent));
        assert_eq!(state.deck_size(), 1);
        state.draw_to_hand(Side::Opponent);
        assert_eq!(state.draw_to_hand(Side::Opponent), None);
    }

    #[test]
    fn test_destroy_card_accounting() {
        let mut state = GameState::new(1);
        let id = state.insert_card(Archetype::Chat, Zone::Field(Side::Controlled));
        state.insert_card(Archetype::Mime, Zone::Deck);

        assert!(state.any_field_occupied());
        assert_eq!(state.destroy_card(id), Some(Zone::Field(Side::Controlled)));
        assert_eq!(state.destroy_card(id), None);

        assert!(!state.any_field_occupied());
        assert_eq!(state.destroyed(), &[id]);
        assert_eq!(state.accounted_cards(), state.total_cards());
    }

    #[test]
    fn test_field_cards_order() {
        let mut state = GameState::new(1);
        let opp = state.insert_card(Archetype::Mime, Zone::Field(Side::Opponent));
        let own = state.insert_card(Archetype::Val, Zone::Field(Side::Controlled));

        assert_eq!(
            state.field_cards(),
            vec![(Side::Controlled, own), (Side::Opponent, opp)]
        );
    }
}
