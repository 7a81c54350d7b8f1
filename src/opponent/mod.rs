//! Scripted opponent.
//!
//! - `OpponentPolicy`: card and target choice
//! - `WeightedOpponent`: the standard, deliberately imperfect opponent
//! - `UniformOpponent`: uniform choices, also used to auto-play the
//!   controlled side

mod policy;

pub use policy::{policy_for, OpponentPolicy, UniformOpponent, WeightedOpponent};
