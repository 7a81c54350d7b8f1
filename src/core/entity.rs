//! Card instance identification.
//!
//! Every card instance in a game has a unique `CardId`. Ids are allocated
//! sequentially per game starting at 1, so a fresh 10-card deck holds
//! `c1..c10`.
//!
//! ```
//! use deck_cadence::core::CardId;
//!
//! let id = CardId::new(3);
//! assert_eq!(id.to_string(), "c3");
//! assert_eq!("c3".parse::<CardId>(), Ok(id));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// First id handed out in a game.
    pub const FIRST: CardId = CardId(1);

    /// Create a new card id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The id allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Error returned when a card id string is malformed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid card id `{0}` (expected e.g. `c4`)")]
pub struct ParseCardIdError(pub String);

impl std::str::FromStr for CardId {
    type Err = ParseCardIdError;

    /// Accepts both `c4` and `4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('c').unwrap_or(trimmed);
        digits
            .parse::<u32>()
            .map(CardId)
            .map_err(|_| ParseCardIdError(s.to_string()))
    }
}
