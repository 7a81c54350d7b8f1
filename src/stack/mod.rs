//! Effect queue and resolution status.
//!
//! Effects resolve strictly first-in first-out. Last-breath effects
//! produced while draining join the tail of the same queue, so chained
//! destructions resolve in the order their cards were destroyed.
//!
//! ```
//! use deck_cadence::cards::Archetype;
//! use deck_cadence::core::{CardId, GameState, Side};
//! use deck_cadence::effects::{Effect, EffectSource};
//! use deck_cadence::events::EventLog;
//! use deck_cadence::stack::{EffectQueue, ResolutionStatus};
//!
//! let mut state = GameState::new(42);
//! let mut log = EventLog::new();
//! let mut queue = EffectQueue::new();
//!
//! // Drawing from an empty deck degrades to a logged no-op
//! let source = EffectSource::new(Archetype::Val, CardId(1));
//! queue.enqueue(Effect::draw(Side::Controlled, 2, source));
//! assert_eq!(queue.drain(&mut state, &mut log), ResolutionStatus::Complete);
//! assert_eq!(log.len(), 1);
//! ```

mod queue;

pub use queue::EffectQueue;

use crate::effects::TargetingRequest;

/// Status returned by draining the queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolutionStatus {
    /// The queue is empty.
    Complete,

    /// Draining stopped on an effect that needs a target choice.
    AwaitingTargets(TargetingRequest),
}
