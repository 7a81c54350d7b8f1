//! Core engine types: card ids, sides, board state, commands, RNG,
//! configuration, and errors.
//!
//! Everything here is independent of turn flow. The `rules` module drives
//! these types; nothing in `core` calls back into it except for the phase
//! carried by a rejection.

pub mod entity;
pub mod side;
pub mod rng;
pub mod config;
pub mod error;
pub mod action;
pub mod state;

pub use entity::{CardId, ParseCardIdError};
pub use side::{Side, SideMap};
pub use rng::GameRng;
pub use config::{ArchetypeWeights, GameConfig, OpponentConfig, PacingConfig, PolicyKind};
pub use error::{ConfigError, Rejection};
pub use action::{Command, ParseCommandError};
pub use state::GameState;
