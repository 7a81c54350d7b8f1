//! Zone manager for card locations and movement.
//!
//! The `ZoneManager` tracks where each card is and keeps every zone's
//! insertion order (deck order matters for drawing; hand and field order
//! is used for display only). A card is in exactly one zone at a time, or
//! in none once destroyed.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{CardId, GameRng, Side};

/// A card location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// The shared deck. Drawn from the end.
    Deck,
    /// A side's hand.
    Hand(Side),
    /// A side's field (cards in play).
    Field(Side),
}

impl Zone {
    /// The side owning this zone, if any.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Zone::Deck => None,
            Zone::Hand(side) | Zone::Field(side) => Some(side),
        }
    }

    /// Is this one of the two fields?
    #[must_use]
    pub const fn is_field(self) -> bool {
        matches!(self, Zone::Field(_))
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Zone::Deck => f.write_str("deck"),
            Zone::Hand(side) => write!(f, "{side} hand"),
            Zone::Field(side) => write!(f, "{side} field"),
        }
    }
}

/// Manages card locations across zones.
///
/// ```
/// use deck_cadence::core::{CardId, Side};
/// use deck_cadence::zones::{Zone, ZoneManager};
///
/// let mut zones = ZoneManager::new();
/// zones.add_to_zone(CardId(1), Zone::Deck);
/// zones.add_to_zone(CardId(2), Zone::Deck);
///
/// // The deck is drawn from the end
/// assert_eq!(zones.pop_top(Zone::Deck), Some(CardId(2)));
/// zones.add_to_zone(CardId(2), Zone::Hand(Side::Controlled));
/// assert_eq!(zones.cards_in_zone(Zone::Hand(Side::Controlled)), &[CardId(2)]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ZoneManager {
    /// Card locations: card -> zone
    locations: FxHashMap<CardId, Zone>,

    /// Cards per zone, in insertion order.
    zone_order: FxHashMap<Zone, Vec<CardId>>,
}

impl ZoneManager {
    /// Create a new empty zone manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card to the end of a zone.
    ///
    /// Panics if the card is already in a zone.
    pub fn add_to_zone(&mut self, card: CardId, zone: Zone) {
        if self.locations.contains_key(&card) {
            panic!("Card {card} already exists in zone manager");
        }

        self.locations.insert(card, zone);
        self.zone_order.entry(zone).or_default().push(card);
    }

    /// Move a card to the end of another zone.
    ///
    /// Returns the old zone, or `None` if the card wasn't found.
    pub fn move_to_zone(&mut self, card: CardId, new_zone: Zone) -> Option<Zone> {
        let old_zone = self.remove(card)?;
        self.add_to_zone(card, new_zone);
        Some(old_zone)
    }

    /// Remove a card from every zone.
    ///
    /// Returns the zone it was in, or `None` if not found.
    pub fn remove(&mut self, card: CardId) -> Option<Zone> {
        let zone = self.locations.remove(&card)?;

        if let Some(order) = self.zone_order.get_mut(&zone) {
            order.retain(|&c| c != card);
        }

        Some(zone)
    }

    /// Get the zone a card is in.
    #[must_use]
    pub fn get_zone(&self, card: CardId) -> Option<Zone> {
        self.locations.get(&card).copied()
    }

    /// Check if a card is in a specific zone.
    #[must_use]
    pub fn is_in_zone(&self, card: CardId, zone: Zone) -> bool {
        self.locations.get(&card) == Some(&zone)
    }

    /// Check if a card is on either field.
    #[must_use]
    pub fn is_on_field(&self, card: CardId) -> bool {
        self.get_zone(card).is_some_and(Zone::is_field)
    }

    /// Cards in a zone, in insertion order.
    #[must_use]
    pub fn cards_in_zone(&self, zone: Zone) -> &[CardId] {
        self.zone_order.get(&zone).map_or(&[], |v| v.as_slice())
    }

    /// Number of cards in a zone.
    #[must_use]
    pub fn zone_size(&self, zone: Zone) -> usize {
        self.cards_in_zone(zone).len()
    }

    /// Total number of cards in any zone.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.locations.len()
    }

    /// Remove and return the last card of a zone (top of the deck).
    pub fn pop_top(&mut self, zone: Zone) -> Option<CardId> {
        let card = self.zone_order.get_mut(&zone)?.pop()?;
        self.locations.remove(&card);
        Some(card)
    }

    /// Shuffle a zone's order.
    pub fn shuffle_zone(&mut self, zone: Zone, rng: &mut GameRng) {
        if let Some(order) = self.zone_order.get_mut(&zone) {
            rng.shuffle(order);
        }
    }

    /// Remove every card from every zone.
    pub fn clear(&mut self) {
        self.locations.clear();
        self.zone_order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HAND: Zone = Zone::Hand(Side::Controlled);
    const FIELD: Zone = Zone::Field(Side::Opponent);

    #[test]
    fn test_add_and_lookup() {
        let mut zones = ZoneManager::new();
        zones.add_to_zone(CardId(1), Zone::Deck);
        zones.add_to_zone(CardId(2), HAND);

        assert_eq!(zones.get_zone(CardId(1)), Some(Zone::Deck));
        assert!(zones.is_in_zone(CardId(2), HAND));
        assert!(!zones.is_on_field(CardId(2)));
        assert_eq!(zones.total_cards(), 2);
    }

    #[test]
    #[should_panic(expected = "already exists")]
    fn test_double_add_panics() {
        let mut zones = ZoneManager::new();
        zones.add_to_zone(CardId(1), Zone::Deck);
        zones.add_to_zone(CardId(1), HAND);
    }

    #[test]
    fn test_move_preserves_single_location() {
        let mut zones = ZoneManager::new();
        zones.add_to_zone(CardId(1), HAND);
        zones.add_to_zone(CardId(2), HAND);

        assert_eq!(zones.move_to_zone(CardId(1), FIELD), Some(HAND));
        assert_eq!(zones.cards_in_zone(HAND), &[CardId(2)]);
        assert_eq!(zones.cards_in_zone(FIELD), &[CardId(1)]);
        assert!(zones.is_on_field(CardId(1)));
        assert_eq!(zones.total_cards(), 2);

        assert_eq!(zones.move_to_zone(CardId(99), FIELD), None);
    }

    #[test]
    fn test_remove() {
        let mut zones = ZoneManager::new();
        zones.add_to_zone(CardId(1), FIELD);

        assert_eq!(zones.remove(CardId(1)), Some(FIELD));
        assert_eq!(zones.remove(CardId(1)), None);
        assert_eq!(zones.zone_size(FIELD), 0);
        assert_eq!(zones.get_zone(CardId(1)), None);
    }

    #[test]
    fn test_pop_top_order() {
        let mut zones = ZoneManager::new();
        for id in 1..=3 {
            zones.add_to_zone(CardId(id), Zone::Deck);
        }

        assert_eq!(zones.pop_top(Zone::Deck), Some(CardId(3)));
        assert_eq!(zones.pop_top(Zone::Deck), Some(CardId(2)));
        assert_eq!(zones.pop_top(Zone::Deck), Some(CardId(1)));
        assert_eq!(zones.pop_top(Zone::Deck), None);
        assert_eq!(zones.total_cards(), 0);
    }

    #[test]
    fn test_shuffle_keeps_cards() {
        let mut zones = ZoneManager::new();
        for id in 1..=10 {
            zones.add_to_zone(CardId(id), Zone::Deck);
        }

        zones.shuffle_zone(Zone::Deck, &mut GameRng::new(3));

        let mut cards = zones.cards_in_zone(Zone::Deck).to_vec();
        cards.sort_unstable();
        assert_eq!(cards, (1..=10).map(CardId).collect::<Vec<_>>());
    }

    #[test]
    fn test_zone_side() {
        assert_eq!(Zone::Deck.side(), None);
        assert_eq!(HAND.side(), Some(Side::Controlled));
        assert!(FIELD.is_field());
        assert_eq!(FIELD.to_string(), "Opponent field");
    }
}
