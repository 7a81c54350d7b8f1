//! # deck-cadence
//!
//! Turn and effect engine for a short two-sided card duel: the controlled
//! side against a scripted opponent, eight alternating turns, one card per
//! turn, and card effects that chain through a queue.
//!
//! ## Design Principles
//!
//! 1. **Owned state**: one `Engine` owns the whole game. No globals.
//!
//! 2. **Closed effect set**: effects are a sum type resolved by an
//!    exhaustive `match`.
//!
//! 3. **Explicit suspension**: when an effect needs a target choice, the
//!    queue drain returns the pending request as a value. The engine holds
//!    it until an answer arrives; nothing is captured in a callback.
//!
//! 4. **Deterministic**: all randomness comes from a seeded ChaCha8 RNG,
//!    so the same seed and commands replay the same game.
//!
//! ## Modules
//!
//! - `core`: card ids, sides, board state, commands, RNG, configuration, errors
//! - `zones`: deck, hand, and field bookkeeping
//! - `cards`: archetypes, definitions, and the catalog
//! - `effects`: effects, resolution, and target selection
//! - `stack`: the FIFO effect queue
//! - `events`: structured event log
//! - `rules`: the turn engine, snapshots, and scoring
//! - `opponent`: scripted opponent policies

pub mod core;
pub mod zones;
pub mod cards;
pub mod effects;
pub mod stack;
pub mod events;
pub mod rules;
pub mod opponent;

// Re-export commonly used types
pub use crate::core::{
    CardId, Command, ConfigError, GameConfig, GameRng, GameState, OpponentConfig, PacingConfig,
    Rejection, Side, SideMap,
};

pub use crate::zones::{Zone, ZoneManager};

pub use crate::cards::{get_definition, Archetype, CardDefinition, CardInstance, DECK_LIST};

pub use crate::effects::{Effect, EffectResolver, EffectSource, TargetingRequest};

pub use crate::stack::{EffectQueue, ResolutionStatus};

pub use crate::events::{EventLog, GameEvent, LogRecord};

pub use crate::rules::{Engine, GameResult, GameSnapshot, Outcome, Phase, Progress};

pub use crate::opponent::{OpponentPolicy, UniformOpponent, WeightedOpponent};
