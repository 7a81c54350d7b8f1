//! Structured game log.
//!
//! Every observable thing the engine does is a `GameEvent`. Events are
//! appended to an `EventLog` as sequenced `LogRecord`s; the UI reads new
//! records with `since(sequence)` after each command and renders them with
//! `Display`.
//!
//! The log uses a persistent vector, so snapshots of the whole history are
//! O(1) to clone.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::Archetype;
use crate::core::{CardId, Rejection, Side};
use crate::rules::GameResult;

/// A structured game event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// A new game was dealt.
    GameStarted { seed: u64, starting_hand: usize },

    /// A turn began.
    TurnStarted { turn: u8, side: Side },

    /// An in-play passive fired at the start of a turn.
    PassiveTriggered {
        side: Side,
        archetype: Archetype,
        count: usize,
    },

    /// Cards moved from the deck into a hand.
    Drew { side: Side, count: usize },

    /// A draw found the deck empty.
    DeckEmpty { side: Side },

    /// A card moved from hand to field.
    Played {
        side: Side,
        card: CardId,
        archetype: Archetype,
    },

    /// The side had nothing to play.
    CannotPlay { side: Side },

    /// A destroy effect is waiting for a target choice.
    TargetingRequested {
        owner: Side,
        count: usize,
        source: Archetype,
    },

    /// A card was destroyed.
    Destroyed {
        by: Side,
        card: CardId,
        archetype: Archetype,
        owner: Side,
    },

    /// A destroy effect found nothing to destroy.
    DestroyFizzled { side: Side, source: Archetype },

    /// Cards moved from one hand to the other.
    Stole { side: Side, from: Side, count: usize },

    /// A steal found the other hand empty.
    StealFizzled { side: Side, from: Side },

    /// The side passed with an empty hand.
    TurnSkipped { side: Side },

    /// A command was refused.
    Rejected { reason: Rejection },

    /// The final turn completed.
    GameOver { result: GameResult },
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::GameStarted { seed, starting_hand } => {
                write!(f, "New game (seed {seed}): each side draws {starting_hand}.")
            }
            GameEvent::TurnStarted { turn, side } => {
                write!(f, "Turn {}: {side}.", u16::from(*turn) + 1)
            }
            GameEvent::PassiveTriggered { side, archetype, count } => {
                write!(f, "{side} activates {archetype}: +{count} draw.")
            }
            GameEvent::Drew { side, count } => {
                write!(f, "{side} draws {count} card{}.", plural(*count))
            }
            GameEvent::DeckEmpty { side } => {
                write!(f, "{side} cannot draw (deck empty).")
            }
            GameEvent::Played { side, archetype, .. } => {
                write!(f, "{side} plays {archetype}.")
            }
            GameEvent::CannotPlay { side } => {
                write!(f, "{side} cannot play (empty hand).")
            }
            GameEvent::TargetingRequested { owner, count, source } => {
                write!(f, "{source}: {owner} chooses up to {count} card{}.", plural(*count))
            }
            GameEvent::Destroyed { by, archetype, owner, .. } => {
                write!(f, "{by} destroys {archetype} ({owner} field).")
            }
            GameEvent::DestroyFizzled { side, source } => {
                write!(f, "{side} wants to destroy with {source}, but no field has cards.")
            }
            GameEvent::Stole { side, count, .. } => {
                write!(f, "{side} steals {count} random card{}.", plural(*count))
            }
            GameEvent::StealFizzled { side, .. } => {
                write!(f, "{side} tries to steal, but the opposing hand is empty.")
            }
            GameEvent::TurnSkipped { side } => {
                write!(f, "{side} passes (empty hand).")
            }
            GameEvent::Rejected { reason } => {
                let text = reason.to_string();
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => write!(f, "{}{}.", first.to_uppercase(), chars.as_str()),
                    None => Ok(()),
                }
            }
            GameEvent::GameOver { result } => write!(f, "Game over: {result}."),
        }
    }
}

/// A sequenced log entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Position in the log, starting at 0.
    pub sequence: u64,
    /// Turn index when the event happened.
    pub turn: u8,
    pub event: GameEvent,
}

/// Append-only event history.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    records: Vector<LogRecord>,
    next_sequence: u64,
    turn: u8,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, returning its sequence number.
    pub fn push(&mut self, event: GameEvent) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        debug!(sequence, turn = self.turn, %event, "game event");
        self.records.push_back(LogRecord {
            sequence,
            turn: self.turn,
            event,
        });
        sequence
    }

    /// Set the turn index stamped on subsequent records.
    pub fn set_turn(&mut self, turn: u8) {
        self.turn = turn;
    }

    /// Sequence number the next record will get.
    #[must_use]
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    /// Every record.
    #[must_use]
    pub fn records(&self) -> &Vector<LogRecord> {
        &self.records
    }

    /// Records with `sequence >= from`.
    pub fn since(&self, from: u64) -> impl Iterator<Item = &LogRecord> {
        self.records.iter().filter(move |record| record.sequence >= from)
    }

    /// Events only, in order.
    pub fn events(&self) -> impl Iterator<Item = &GameEvent> {
        self.records.iter().map(|record| &record.event)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record and restart numbering.
    pub fn clear(&mut self) {
        self.records.clear();
        self.next_sequence = 0;
        self.turn = 0;
    }
}
