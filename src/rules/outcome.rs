//! End-of-game scoring.
//!
//! The score is the number of cards each side has on its field when the
//! last turn completes. More cards wins; equal counts draw.

use serde::{Deserialize, Serialize};

use crate::core::{GameState, Side};

/// Outcome from the controlled side's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

/// Final field counts and outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Cards on the controlled side's field.
    pub controlled: usize,
    /// Cards on the opponent's field.
    pub opponent: usize,
    pub outcome: Outcome,
}

impl GameResult {
    /// Score two field counts.
    #[must_use]
    pub const fn new(controlled: usize, opponent: usize) -> Self {
        let outcome = if controlled > opponent {
            Outcome::Win
        } else if opponent > controlled {
            Outcome::Loss
        } else {
            Outcome::Draw
        };
        Self {
            controlled,
            opponent,
            outcome,
        }
    }

    /// Score the current fields.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        Self::new(
            state.field(Side::Controlled).len(),
            state.field(Side::Opponent).len(),
        )
    }

    /// The winning side, if any.
    #[must_use]
    pub const fn winner(&self) -> Option<Side> {
        match self.outcome {
            Outcome::Win => Some(Side::Controlled),
            Outcome::Loss => Some(Side::Opponent),
            Outcome::Draw => None,
        }
    }

    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        self.winner() == Some(side)
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let score = format!("{}-{}", self.controlled, self.opponent);
        match self.winner() {
            Some(side) => write!(f, "{side} wins {score}"),
            None => write!(f, "draw {score}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcomes() {
        let win = GameResult::new(5, 3);
        assert_eq!(win.outcome, Outcome::Win);
        assert!(win.is_winner(Side::Controlled));
        assert!(!win.is_winner(Side::Opponent));

        assert_eq!(GameResult::new(1, 4).winner(), Some(Side::Opponent));

        let draw = GameResult::new(2, 2);
        assert_eq!(draw.outcome, Outcome::Draw);
        assert_eq!(draw.winner(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(GameResult::new(5, 3).to_string(), "Player wins 5-3");
        assert_eq!(GameResult::new(0, 0).to_string(), "draw 0-0");
    }
}
