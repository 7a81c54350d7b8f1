//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of an archetype: its
//! display name, rules text, and up to three effect generators. Generators
//! are plain function pointers; they are pure and only describe an effect.
//! Applying it to zones or the queue is the engine's job.
//!
//! Instance-specific data (id, owner) lives in `CardInstance`.

use serde::{Deserialize, Serialize};

use super::instance::CardInstance;
use crate::core::Side;
use crate::effects::Effect;

/// The closed set of card archetypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Archetype {
    /// Last breath: steal 2 random cards from the opposing hand.
    Robin,
    /// On entry: destroy 1 card of your choice on any field.
    Mime,
    /// Last breath: destroy 2 cards of your choice on any field.
    Chat,
    /// On entry: draw 2 cards.
    Val,
    /// While in play: draw 1 extra card at the start of your turn.
    Merlin,
}

impl Archetype {
    /// Every archetype, in catalog order.
    pub const ALL: [Archetype; 5] = [
        Archetype::Robin,
        Archetype::Mime,
        Archetype::Chat,
        Archetype::Val,
        Archetype::Merlin,
    ];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Archetype::Robin => "Robin Descartes",
            Archetype::Mime => "Mime Mique",
            Archetype::Chat => "Chat Rond",
            Archetype::Val => "Val Kyrie",
            Archetype::Merlin => "Merlin Lepiocheur",
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Produces an effect for a card owned by `Side`.
pub type EffectGenerator = fn(Side, &CardInstance) -> Effect;

/// Static card definition.
///
/// ```
/// use deck_cadence::cards::{catalog, Archetype};
///
/// let mime = catalog::get_definition(Archetype::Mime);
/// assert!(mime.on_entry.is_some());
/// assert!(mime.on_destruction.is_none());
/// ```
#[derive(Clone, Copy)]
pub struct CardDefinition {
    /// Which archetype this defines.
    pub archetype: Archetype,

    /// Rules text (for display).
    pub text: &'static str,

    /// Triggered when the card moves from hand to field.
    pub on_entry: Option<EffectGenerator>,

    /// Applied at the start of each of the owner's turns while on the field.
    pub while_in_play: Option<EffectGenerator>,

    /// Triggered when the card is destroyed ("last breath").
    pub on_destruction: Option<EffectGenerator>,
}

impl std::fmt::Debug for CardDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDefinition")
            .field("archetype", &self.archetype)
            .field("on_entry", &self.on_entry.is_some())
            .field("while_in_play", &self.while_in_play.is_some())
            .field("on_destruction", &self.on_destruction.is_some())
            .finish()
    }
}

impl CardDefinition {
    /// Create a definition with no effects.
    #[must_use]
    pub const fn new(archetype: Archetype, text: &'static str) -> Self {
        Self {
            archetype,
            text,
            on_entry: None,
            while_in_play: None,
            on_destruction: None,
        }
    }

    /// Set the on-entry generator (builder pattern).
    #[must_use]
    pub const fn with_on_entry(mut self, generator: EffectGenerator) -> Self {
        self.on_entry = Some(generator);
        self
    }

    /// Set the while-in-play generator (builder pattern).
    #[must_use]
    pub const fn with_while_in_play(mut self, generator: EffectGenerator) -> Self {
        self.while_in_play = Some(generator);
        self
    }

    /// Set the on-destruction generator (builder pattern).
    #[must_use]
    pub const fn with_on_destruction(mut self, generator: EffectGenerator) -> Self {
        self.on_destruction = Some(generator);
        self
    }

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.archetype.name()
    }

    /// Effect triggered by playing `card` for `owner`, if any.
    #[must_use]
    pub fn entry_effect(&self, owner: Side, card: &CardInstance) -> Option<Effect> {
        self.on_entry.map(|generate| generate(owner, card))
    }

    /// Passive effect granted by `card` while in play for `owner`, if any.
    #[must_use]
    pub fn passive_effect(&self, owner: Side, card: &CardInstance) -> Option<Effect> {
        self.while_in_play.map(|generate| generate(owner, card))
    }

    /// Effect triggered by destroying `card` owned by `owner`, if any.
    #[must_use]
    pub fn destruction_effect(&self, owner: Side, card: &CardInstance) -> Option<Effect> {
        self.on_destruction.map(|generate| generate(owner, card))
    }

    /// Does destroying this card trigger anything?
    #[must_use]
    pub const fn has_last_breath(&self) -> bool {
        self.on_destruction.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardId;
    use crate::effects::EffectSource;

    fn draw_two(owner: Side, card: &CardInstance) -> Effect {
        Effect::draw(owner, 2, EffectSource::new(card.archetype, card.id))
    }

    #[test]
    fn test_definition_builder() {
        let def = CardDefinition::new(Archetype::Val, "Draw 2.").with_on_entry(draw_two);

        assert_eq!(def.name(), "Val Kyrie");
        assert!(def.on_entry.is_some());
        assert!(def.while_in_play.is_none());
        assert!(!def.has_last_breath());
    }

    #[test]
    fn test_generators_bind_owner_and_source() {
        let def = CardDefinition::new(Archetype::Val, "Draw 2.").with_on_entry(draw_two);
        let card = CardInstance::new(CardId(3), Archetype::Val, Some(Side::Opponent));

        let effect = def.entry_effect(Side::Opponent, &card).unwrap();
        assert_eq!(effect.owner(), Side::Opponent);
        assert_eq!(effect.source(), EffectSource::new(Archetype::Val, CardId(3)));
        assert!(def.destruction_effect(Side::Opponent, &card).is_none());
    }

    #[test]
    fn test_archetype_names_unique() {
        let mut names: Vec<_> = Archetype::ALL.iter().map(|a| a.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Archetype::ALL.len());
    }
}
