//! Inbound commands.
//!
//! A `Command` is one request from the controlled side's UI. The engine
//! dispatches every command through `Engine::execute`, so drivers can
//! record, replay, or parse them uniformly.
//!
//! ```
//! use deck_cadence::core::{CardId, Command};
//!
//! let play: Command = "play c4".parse().unwrap();
//! assert_eq!(play, Command::PlayCard(CardId(4)));
//! assert_eq!("confirm".parse::<Command>().unwrap(), Command::ConfirmTargets);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::{CardId, ParseCardIdError};

/// A command from the controlled side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "command", content = "card", rename_all = "snake_case")]
pub enum Command {
    /// Deal a fresh game.
    StartNewGame,
    /// Play a card from hand.
    PlayCard(CardId),
    /// Add a field card to the pending target selection.
    SelectTarget(CardId),
    /// Remove a card from the pending target selection.
    DeselectTarget(CardId),
    /// Select if unselected, deselect if selected.
    ToggleTarget(CardId),
    /// Submit the target selection.
    ConfirmTargets,
    /// End the turn after playing.
    EndTurn,
    /// Pass with an empty hand.
    SkipTurn,
}

impl Command {
    /// The card the command refers to, if any.
    #[must_use]
    pub const fn card(&self) -> Option<CardId> {
        match self {
            Command::PlayCard(card)
            | Command::SelectTarget(card)
            | Command::DeselectTarget(card)
            | Command::ToggleTarget(card) => Some(*card),
            Command::StartNewGame | Command::ConfirmTargets | Command::EndTurn | Command::SkipTurn => {
                None
            }
        }
    }

    /// Does this command act on a pending target choice?
    #[must_use]
    pub const fn is_targeting(&self) -> bool {
        matches!(
            self,
            Command::SelectTarget(_)
                | Command::DeselectTarget(_)
                | Command::ToggleTarget(_)
                | Command::ConfirmTargets
        )
    }
}

/// Error returned when a command line cannot be parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}`")]
    Unknown(String),

    #[error("`{0}` needs a card id")]
    MissingCard(&'static str),

    #[error(transparent)]
    BadCard(#[from] ParseCardIdError),
}

impl std::str::FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().ok_or(ParseCommandError::Empty)?;

        let card = |name: &'static str, arg: Option<&str>| -> Result<CardId, ParseCommandError> {
            Ok(arg.ok_or(ParseCommandError::MissingCard(name))?.parse()?)
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "new" | "n" => Command::StartNewGame,
            "play" | "p" => Command::PlayCard(card("play", words.next())?),
            "select" => Command::SelectTarget(card("select", words.next())?),
            "deselect" => Command::DeselectTarget(card("deselect", words.next())?),
            "toggle" | "t" => Command::ToggleTarget(card("toggle", words.next())?),
            "confirm" | "c" => Command::ConfirmTargets,
            "end" | "e" => Command::EndTurn,
            "skip" | "s" => Command::SkipTurn,
            _ => return Err(ParseCommandError::Unknown(verb.to_string())),
        };
        Ok(command)
    }
}
