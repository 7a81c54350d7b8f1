//! FIFO effect queue.
//!
//! Effects are enqueued at the tail and resolved from the head. Resolving
//! an effect may enqueue more effects; `drain` keeps going over the grown
//! queue until it is empty or an effect suspends for targeting.

use std::collections::VecDeque;

use tracing::trace;

use super::ResolutionStatus;
use crate::core::GameState;
use crate::effects::{Effect, EffectResolver, Resolution, ResolverContext};
use crate::events::EventLog;

/// Pending effects, oldest first.
#[derive(Clone, Debug, Default)]
pub struct EffectQueue {
    pending: VecDeque<Effect>,
}

impl EffectQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an effect at the tail.
    pub fn enqueue(&mut self, effect: Effect) {
        trace!(kind = effect.kind_name(), owner = %effect.owner(), len = self.pending.len() + 1, "enqueue");
        self.pending.push_back(effect);
    }

    /// Remove the effect at the head.
    pub fn dequeue(&mut self) -> Option<Effect> {
        let effect = self.pending.pop_front()?;
        trace!(kind = effect.kind_name(), remaining = self.pending.len(), "dequeue");
        Some(effect)
    }

    /// Look at the head without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Effect> {
        self.pending.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending effects, head first.
    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.pending.iter()
    }

    /// Drop every pending effect.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Resolve effects from the head until the queue is empty or one of
    /// them needs a target choice.
    ///
    /// A suspended effect has already left the queue; its remainder is the
    /// returned request.
    pub fn drain(&mut self, state: &mut GameState, log: &mut EventLog) -> ResolutionStatus {
        while let Some(effect) = self.dequeue() {
            let mut ctx = ResolverContext::new(state, self, log);
            if let Resolution::NeedsTargets(request) = EffectResolver::resolve(&mut ctx, effect) {
                return ResolutionStatus::AwaitingTargets(request);
            }
        }
        ResolutionStatus::Complete
    }
}
