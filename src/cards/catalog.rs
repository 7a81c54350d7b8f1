//! The card catalog.
//!
//! The archetype set is closed, so lookup is a static table with no
//! failure path. The catalog also defines the standard 10-card deck list.

use super::definition::{Archetype, CardDefinition};
use super::instance::CardInstance;
use crate::core::Side;
use crate::effects::{Effect, EffectSource};

fn source_of(card: &CardInstance) -> EffectSource {
    EffectSource::new(card.archetype, card.id)
}

fn robin_last_breath(owner: Side, card: &CardInstance) -> Effect {
    Effect::steal_random(owner, 2, source_of(card))
}

fn mime_entry(owner: Side, card: &CardInstance) -> Effect {
    Effect::destroy_choose(owner, 1, source_of(card))
}

fn chat_last_breath(owner: Side, card: &CardInstance) -> Effect {
    Effect::destroy_choose(owner, 2, source_of(card))
}

fn val_entry(owner: Side, card: &CardInstance) -> Effect {
    Effect::draw(owner, 2, source_of(card))
}

fn merlin_in_play(owner: Side, card: &CardInstance) -> Effect {
    Effect::extra_draw_start_turn(owner, 1, source_of(card))
}

static CATALOG: [CardDefinition; 5] = [
    CardDefinition::new(
        Archetype::Robin,
        "Last breath: steal 2 random cards from the opposing hand.",
    )
    .with_on_destruction(robin_last_breath),
    CardDefinition::new(
        Archetype::Mime,
        "On entry: destroy 1 card of your choice (any field).",
    )
    .with_on_entry(mime_entry),
    CardDefinition::new(
        Archetype::Chat,
        "Last breath: destroy 2 cards of your choice (any field).",
    )
    .with_on_destruction(chat_last_breath),
    CardDefinition::new(Archetype::Val, "On entry: draw 2 cards.").with_on_entry(val_entry),
    CardDefinition::new(
        Archetype::Merlin,
        "In play: draw 1 extra card at the start of your turn.",
    )
    .with_while_in_play(merlin_in_play),
];

/// The standard deck: 2 Robin, 4 Mime, 2 Chat, 1 Val, 1 Merlin.
pub const DECK_LIST: [Archetype; 10] = [
    Archetype::Robin,
    Archetype::Robin,
    Archetype::Mime,
    Archetype::Mime,
    Archetype::Mime,
    Archetype::Mime,
    Archetype::Chat,
    Archetype::Chat,
    Archetype::Val,
    Archetype::Merlin,
];

/// Look up the definition of an archetype.
#[must_use]
pub fn get_definition(archetype: Archetype) -> &'static CardDefinition {
    let def = &CATALOG[archetype as usize];
    debug_assert_eq!(def.archetype, archetype, "catalog out of order");
    def
}

/// All definitions, in catalog order.
#[must_use]
pub fn definitions() -> &'static [CardDefinition] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardId;

    fn count(archetype: Archetype) -> usize {
        DECK_LIST.iter().filter(|&&a| a == archetype).count()
    }

    #[test]
    fn test_catalog_order_matches_archetypes() {
        for archetype in Archetype::ALL {
            assert_eq!(get_definition(archetype).archetype, archetype);
        }
        assert_eq!(definitions().len(), Archetype::ALL.len());
    }

    #[test]
    fn test_deck_list_composition() {
        assert_eq!(DECK_LIST.len(), 10);
        assert_eq!(count(Archetype::Robin), 2);
        assert_eq!(count(Archetype::Mime), 4);
        assert_eq!(count(Archetype::Chat), 2);
        assert_eq!(count(Archetype::Val), 1);
        assert_eq!(count(Archetype::Merlin), 1);
    }

    #[test]
    fn test_robin_steals_two_from_other_side() {
        let card = CardInstance::new(CardId(1), Archetype::Robin, Some(Side::Controlled));
        let effect = get_definition(Archetype::Robin)
            .destruction_effect(Side::Controlled, &card)
            .unwrap();

        assert_eq!(
            effect,
            Effect::StealRandom {
                owner: Side::Controlled,
                from: Side::Opponent,
                count: 2,
                source: EffectSource::new(Archetype::Robin, CardId(1)),
            }
        );
    }

    #[test]
    fn test_trigger_slots() {
        let mime = get_definition(Archetype::Mime);
        let chat = get_definition(Archetype::Chat);
        let val = get_definition(Archetype::Val);
        let merlin = get_definition(Archetype::Merlin);

        let card = CardInstance::new(CardId(5), Archetype::Mime, Some(Side::Opponent));
        assert!(matches!(
            mime.entry_effect(Side::Opponent, &card),
            Some(Effect::DestroyChoose { count: 1, owner: Side::Opponent, .. })
        ));
        assert!(matches!(
            chat.destruction_effect(Side::Opponent, &card),
            Some(Effect::DestroyChoose { count: 2, .. })
        ));
        assert!(matches!(
            val.entry_effect(Side::Opponent, &card),
            Some(Effect::Draw { count: 2, .. })
        ));
        assert!(matches!(
            merlin.passive_effect(Side::Opponent, &card),
            Some(Effect::ExtraDrawStartTurn { count: 1, .. })
        ));
        assert!(merlin.entry_effect(Side::Opponent, &card).is_none());
    }

    #[test]
    fn test_last_breath_archetypes() {
        let dangerous: Vec<_> = definitions()
            .iter()
            .filter(|d| d.has_last_breath())
            .map(|d| d.archetype)
            .collect();
        assert_eq!(dangerous, vec![Archetype::Robin, Archetype::Chat]);
    }
}
