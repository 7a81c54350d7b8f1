//! Turn flow and scoring.
//!
//! - `Engine`: drives one game through its turns
//! - `TurnState`, `Phase`, `TurnLock`: per-turn bookkeeping
//! - `Progress`: what the engine waits for after each call
//! - `GameResult`: end-of-game field comparison
//! - `GameSnapshot`: serializable view for presentation

pub mod engine;
pub mod outcome;
pub mod snapshot;
pub mod turn;

pub use engine::Engine;
pub use outcome::{GameResult, Outcome};
pub use snapshot::{CardView, GameSnapshot, TargetingView};
pub use turn::{Phase, Progress, TurnLock, TurnState};
