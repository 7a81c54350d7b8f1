//! Turn bookkeeping: phases, per-turn state, and the advancement lock.

use serde::{Deserialize, Serialize};

use super::outcome::GameResult;
use crate::core::Side;

/// Engine phase.
///
/// The normal cycle is `StartTurn -> Play -> Resolve`, with `Targeting`
/// nested inside `Resolve` and `GameOver` terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No game has been started.
    #[default]
    Idle,
    StartTurn,
    Play,
    Resolve,
    Targeting,
    GameOver,
}

impl Phase {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::StartTurn => "start of turn",
            Phase::Play => "play",
            Phase::Resolve => "resolve",
            Phase::Targeting => "targeting",
            Phase::GameOver => "game over",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// State of the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Zero-based turn index.
    pub index: u8,
    /// Side acting this turn. Always `Side::for_turn(index)`.
    pub side: Side,
    pub phase: Phase,
    /// Has the acting side played a card this turn?
    pub played: bool,
    /// Has the acting side passed with an empty hand?
    pub passed: bool,
}

impl TurnState {
    /// Fresh state for turn `index`, before start-of-turn effects.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self {
            index,
            side: Side::for_turn(index),
            phase: Phase::StartTurn,
            played: false,
            passed: false,
        }
    }

    /// State before any game has started.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            ..Self::new(0)
        }
    }

    /// One-based turn number, for display.
    #[must_use]
    pub const fn number(&self) -> u16 {
        self.index as u16 + 1
    }

    /// Is the acting side done with this turn?
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.played || self.passed
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Single-flight lock around turn advancement.
///
/// Not reentrant: acquiring a held lock fails, and the caller drops its
/// request rather than waiting.
#[derive(Clone, Copy, Debug, Default)]
pub struct TurnLock {
    held: bool,
}

impl TurnLock {
    #[must_use]
    pub const fn new() -> Self {
        Self { held: false }
    }

    /// Take the lock. Returns `false` if it is already held.
    #[must_use]
    pub fn try_acquire(&mut self) -> bool {
        if self.held {
            return false;
        }
        self.held = true;
        true
    }

    /// Release the lock.
    pub fn release(&mut self) {
        debug_assert!(self.held, "released a turn lock that was not held");
        self.held = false;
    }

    #[must_use]
    pub const fn is_held(&self) -> bool {
        self.held
    }
}

/// Where the engine stopped after a command or step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progress {
    /// No game in progress.
    NotStarted,
    /// The controlled side may act (play, end, or skip).
    AwaitingPlayer,
    /// A target choice is outstanding for `owner`.
    AwaitingTargets { owner: Side },
    /// The opponent has a step to take; call `advance`.
    OpponentToAct,
    /// The request arrived while advancement was in progress and was dropped.
    Dropped,
    /// The game is over.
    Finished(GameResult),
}

impl Progress {
    /// Does the engine need input from the controlled side?
    #[must_use]
    pub const fn needs_player(&self) -> bool {
        matches!(
            self,
            Progress::AwaitingPlayer
                | Progress::AwaitingTargets {
                    owner: Side::Controlled
                }
        )
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self, Progress::Finished(_))
    }
}
