//! Error types.
//!
//! Nothing in the turn/effect engine is fatal. Invalid commands are
//! answered with a [`Rejection`]: the command is a no-op, the state is
//! untouched, and the rejection is appended to the event log so the UI can
//! show the corrective message. [`ConfigError`] covers invalid or
//! unreadable configuration, which is checked before a game starts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::CardId;
use crate::rules::Phase;

/// A user-correctable command rejection.
///
/// The `Display` text is the corrective message shown to the player.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("no game is in progress")]
    NotStarted,

    #[error("the game is over")]
    GameOver,

    #[error("it is not your turn")]
    NotYourTurn,

    #[error("a target choice is required to continue")]
    TargetingInProgress,

    #[error("that action is not available during the {phase} phase")]
    WrongPhase { phase: Phase },

    #[error("you already played a card this turn")]
    AlreadyPlayed,

    #[error("{card} is not in your hand")]
    NotInHand { card: CardId },

    #[error("you must play a card (if you can) before ending your turn")]
    MustPlayFirst,

    #[error("you can only pass when your hand is empty")]
    HandNotEmpty,

    #[error("no target choice is pending")]
    NoTargetingRequest,

    #[error("the opponent is choosing targets")]
    NotYourChoice,

    #[error("{card} cannot be targeted")]
    NotTargetable { card: CardId },

    #[error("{card} is not selected")]
    NotSelected { card: CardId },

    #[error("you can select at most {max} card(s)")]
    SelectionFull { max: usize },

    #[error("select at least one card first")]
    NothingSelected,
}

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("total_turns must be at least 1")]
    NoTurns,

    #[error("deck list is empty")]
    EmptyDeck,

    #[error("opponent weight for {archetype} must be finite and non-negative (got {weight})")]
    InvalidWeight { archetype: String, weight: f32 },

    #[error("opponent jitter band [{low}, {high}) is invalid")]
    InvalidJitter { low: f32, high: f32 },

    #[error("opponent roll thresholds must lie in [0, 1] and sum to at most 1 (random {random}, own field {own_field})")]
    InvalidRolls { random: f32, own_field: f32 },

    #[error("turn index {index} is outside the {total}-turn schedule")]
    TurnOutOfRange { index: u8, total: u8 },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            Rejection::NotInHand { card: CardId(4) }.to_string(),
            "c4 is not in your hand"
        );
        assert_eq!(
            Rejection::SelectionFull { max: 2 }.to_string(),
            "you can select at most 2 card(s)"
        );
        assert_eq!(
            Rejection::WrongPhase { phase: Phase::Resolve }.to_string(),
            "that action is not available during the resolve phase"
        );
    }

    #[test]
    fn test_rejection_serialization() {
        let rejection = Rejection::NotTargetable { card: CardId(9) };
        let json = serde_json::to_string(&rejection).unwrap();
        let restored: Rejection = serde_json::from_str(&json).unwrap();
        assert_eq!(rejection, restored);
    }

    #[test]
    fn test_config_error_from_json() {
        let err: ConfigError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
