//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! The duel has exactly two participants: the controlled (human-driven)
//! side and the scripted opponent. Turns alternate strictly by parity of
//! the turn index, starting with the controlled side.
//!
//! ## SideMap
//!
//! Fixed-size per-side storage with O(1) access by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two fixed participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Human-driven side. Plays on even turn indices.
    Controlled,
    /// Policy-driven side. Plays on odd turn indices.
    Opponent,
}

impl Side {
    /// Both sides, in turn order.
    pub const BOTH: [Side; 2] = [Side::Controlled, Side::Opponent];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Controlled => Side::Opponent,
            Side::Opponent => Side::Controlled,
        }
    }

    /// The side that acts on the given turn index.
    ///
    /// ```
    /// use deck_cadence::core::Side;
    ///
    /// assert_eq!(Side::for_turn(0), Side::Controlled);
    /// assert_eq!(Side::for_turn(1), Side::Opponent);
    /// assert_eq!(Side::for_turn(6), Side::Controlled);
    /// ```
    #[must_use]
    pub const fn for_turn(turn_index: u8) -> Self {
        if turn_index % 2 == 0 {
            Side::Controlled
        } else {
            Side::Opponent
        }
    }

    /// Storage index (0 for controlled, 1 for opponent).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Controlled => 0,
            Side::Opponent => 1,
        }
    }

    /// Short label used in logs and the text renderer.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Side::Controlled => "Player",
            Side::Opponent => "Opponent",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-side data storage.
///
/// ```
/// use deck_cadence::core::{Side, SideMap};
///
/// let mut counts: SideMap<u32> = SideMap::with_value(0);
/// counts[Side::Opponent] += 3;
/// assert_eq!(counts[Side::Controlled], 0);
/// assert_eq!(counts[Side::Opponent], 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Controlled), factory(Side::Opponent)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::BOTH.into_iter().zip(self.data.iter())
    }

    /// Map each entry into a new `SideMap`.
    pub fn map<U>(&self, f: impl Fn(Side, &T) -> U) -> SideMap<U> {
        SideMap::new(|side| f(side, self.get(side)))
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        for side in Side::BOTH {
            assert_ne!(side.opponent(), side);
            assert_eq!(side.opponent().opponent(), side);
        }
    }

    #[test]
    fn test_turn_parity() {
        let order: Vec<_> = (0..8).map(Side::for_turn).collect();
        for (i, side) in order.iter().enumerate() {
            let expected = if i % 2 == 0 { Side::Controlled } else { Side::Opponent };
            assert_eq!(*side, expected);
        }
    }

    #[test]
    fn test_side_map_new_and_mutation() {
        let mut map = SideMap::new(|side| side.index() * 10);
        assert_eq!(map[Side::Controlled], 0);
        assert_eq!(map[Side::Opponent], 10);

        map[Side::Controlled] = 5;
        assert_eq!(map[Side::Controlled], 5);
    }

    #[test]
    fn test_side_map_iter_order() {
        let map = SideMap::new(|side| side.label());
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs[0], (Side::Controlled, &"Player"));
        assert_eq!(pairs[1], (Side::Opponent, &"Opponent"));
    }

    #[test]
    fn test_side_map_serialization() {
        let map = SideMap::new(|side| side.index() as u32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let restored: SideMap<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, restored);
    }
}
