//! Effect system for card abilities.
//!
//! - `Effect`: the closed set of effect kinds
//! - `EffectResolver`: applies effects to game state
//! - `TargetingRequest`: a destroy effect suspended on a target choice
//!
//! Effects never reach into zones themselves. Card definitions produce
//! them, the queue orders them, and the resolver applies them.

mod effect;
mod resolver;
mod targeting;

pub use effect::{Effect, EffectSource};
pub use resolver::{EffectResolver, Resolution, ResolverContext};
pub use targeting::{TargetCandidate, TargetingRequest};
