//! Card system: archetypes, definitions, instances, and the catalog.
//!
//! - `Archetype`: the closed set of card types
//! - `CardDefinition`: static data and effect generators per archetype
//! - `CardInstance`: one physical card in a game
//! - `catalog`: static lookup and the standard deck list

mod definition;
mod instance;
pub mod catalog;

pub use catalog::{get_definition, DECK_LIST};
pub use definition::{Archetype, CardDefinition, EffectGenerator};
pub use instance::CardInstance;
