//! Zone system for card locations.
//!
//! Three kinds of zone exist: the shared `Deck`, and a `Hand` and `Field`
//! per side. `ZoneManager` tracks every card's location and each zone's
//! order.

pub mod manager;

pub use manager::{Zone, ZoneManager};
