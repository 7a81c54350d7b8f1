//! Card instances - runtime card state.
//!
//! `CardInstance` represents one physical card in a game. Its identity and
//! archetype never change; its owner does (drawing assigns one, a steal
//! reassigns it).
//!
//! ## Ownerless Cards
//!
//! Cards still in the shared deck have no owner yet.

use serde::{Deserialize, Serialize};

use super::definition::Archetype;
use crate::core::{CardId, Side};

/// A card instance in a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique id for this instance.
    pub id: CardId,

    /// Reference to the card definition.
    pub archetype: Archetype,

    /// Current owner. `None` while in the shared deck.
    pub owner: Option<Side>,
}

impl CardInstance {
    /// Create a card instance.
    #[must_use]
    pub const fn new(id: CardId, archetype: Archetype, owner: Option<Side>) -> Self {
        Self { id, archetype, owner }
    }

    /// Create an ownerless instance (a card in the deck).
    #[must_use]
    pub const fn unowned(id: CardId, archetype: Archetype) -> Self {
        Self::new(id, archetype, None)
    }

    /// Check if this card has no owner yet.
    #[must_use]
    pub const fn is_unowned(&self) -> bool {
        self.owner.is_none()
    }

    /// Reassign ownership.
    pub fn set_owner(&mut self, owner: Side) {
        self.owner = Some(owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unowned_then_owned() {
        let mut card = CardInstance::unowned(CardId(10), Archetype::Robin);
        assert!(card.is_unowned());

        card.set_owner(Side::Controlled);
        assert_eq!(card.owner, Some(Side::Controlled));

        card.set_owner(Side::Opponent);
        assert_eq!(card.owner, Some(Side::Opponent));
        assert_eq!(card.id, CardId(10));
        assert_eq!(card.archetype, Archetype::Robin);
    }

    #[test]
    fn test_card_instance_serialization() {
        let card = CardInstance::new(CardId(2), Archetype::Merlin, Some(Side::Opponent));
        let json = serde_json::to_string(&card).unwrap();
        let restored: CardInstance = serde_json::from_str(&json).unwrap();
        assert_eq!(card, restored);
    }
}
