//! Game configuration types.
//!
//! - `GameConfig`: turn schedule, deck list, seed
//! - `OpponentConfig`: weights and roll thresholds for the scripted opponent
//! - `PacingConfig`: presentation delays, read only by drivers
//!
//! Every field has a default matching the standard game, so a JSON config
//! only needs to name what it overrides.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cards::{Archetype, DECK_LIST};

/// Base play weight per archetype.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchetypeWeights {
    pub robin: f32,
    pub mime: f32,
    pub chat: f32,
    pub val: f32,
    pub merlin: f32,
}

impl Default for ArchetypeWeights {
    fn default() -> Self {
        Self {
            robin: 1.0,
            mime: 4.0,
            chat: 0.9,
            val: 2.2,
            merlin: 1.8,
        }
    }
}

impl ArchetypeWeights {
    /// Every archetype at weight 1.
    #[must_use]
    pub const fn flat() -> Self {
        Self {
            robin: 1.0,
            mime: 1.0,
            chat: 1.0,
            val: 1.0,
            merlin: 1.0,
        }
    }

    /// Weight of one archetype.
    #[must_use]
    pub const fn get(&self, archetype: Archetype) -> f32 {
        match archetype {
            Archetype::Robin => self.robin,
            Archetype::Mime => self.mime,
            Archetype::Chat => self.chat,
            Archetype::Val => self.val,
            Archetype::Merlin => self.merlin,
        }
    }

    /// Set the weight of one archetype.
    #[must_use]
    pub fn with(mut self, archetype: Archetype, weight: f32) -> Self {
        let slot = match archetype {
            Archetype::Robin => &mut self.robin,
            Archetype::Mime => &mut self.mime,
            Archetype::Chat => &mut self.chat,
            Archetype::Val => &mut self.val,
            Archetype::Merlin => &mut self.merlin,
        };
        *slot = weight;
        self
    }
}

/// Which opponent policy drives the opponent side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Weighted card choice, rolled target choice.
    #[default]
    Weighted,
    /// Uniform card and target choice.
    Uniform,
}

/// Scripted opponent tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpponentConfig {
    /// Policy implementation.
    pub kind: PolicyKind,

    /// Base weight per archetype for card choice.
    pub weights: ArchetypeWeights,

    /// Lower bound of the per-instance weight multiplier.
    pub jitter_low: f32,

    /// Upper bound (exclusive) of the per-instance weight multiplier.
    pub jitter_high: f32,

    /// Chance that a target pick is fully random.
    pub random_pick: f32,

    /// Chance that a target pick prefers the requester's own field.
    ///
    /// The remainder prefers the other field.
    pub own_field_pick: f32,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self {
            kind: PolicyKind::Weighted,
            weights: ArchetypeWeights::default(),
            jitter_low: 0.85,
            jitter_high: 1.25,
            random_pick: 0.22,
            own_field_pick: 0.62,
        }
    }
}

impl OpponentConfig {
    /// Uniform policy with default tuning.
    #[must_use]
    pub fn uniform() -> Self {
        Self {
            kind: PolicyKind::Uniform,
            ..Self::default()
        }
    }

    /// Set base weights.
    #[must_use]
    pub fn with_weights(mut self, weights: ArchetypeWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the jitter band.
    #[must_use]
    pub fn with_jitter(mut self, low: f32, high: f32) -> Self {
        self.jitter_low = low;
        self.jitter_high = high;
        self
    }

    /// Set target roll thresholds.
    #[must_use]
    pub fn with_rolls(mut self, random_pick: f32, own_field_pick: f32) -> Self {
        self.random_pick = random_pick;
        self.own_field_pick = own_field_pick;
        self
    }

    /// Check weights, jitter band, and roll thresholds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for archetype in Archetype::ALL {
            let weight = self.weights.get(archetype);
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    archetype: archetype.name().to_string(),
                    weight,
                });
            }
        }

        let (low, high) = (self.jitter_low, self.jitter_high);
        if !low.is_finite() || !high.is_finite() || low <= 0.0 || high < low {
            return Err(ConfigError::InvalidJitter { low, high });
        }

        let (random, own_field) = (self.random_pick, self.own_field_pick);
        let in_unit = |p: f32| (0.0..=1.0).contains(&p);
        if !in_unit(random) || !in_unit(own_field) || random + own_field > 1.0 {
            return Err(ConfigError::InvalidRolls { random, own_field });
        }

        Ok(())
    }
}

/// Presentation delays, in milliseconds.
///
/// The engine never sleeps; drivers read these between engine steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Delay between opponent steps.
    pub step_ms: u64,
    /// Delay before the opponent answers a target choice.
    pub targeting_ms: u64,
    /// Delay after each resolved effect.
    pub resolve_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            step_ms: 220,
            targeting_ms: 350,
            resolve_ms: 140,
        }
    }
}

impl PacingConfig {
    /// No delays at all.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            step_ms: 0,
            targeting_ms: 0,
            resolve_ms: 0,
        }
    }

    #[must_use]
    pub const fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    #[must_use]
    pub const fn targeting(&self) -> Duration {
        Duration::from_millis(self.targeting_ms)
    }

    #[must_use]
    pub const fn resolve(&self) -> Duration {
        Duration::from_millis(self.resolve_ms)
    }
}

/// Complete game configuration.
///
/// ```
/// use deck_cadence::core::GameConfig;
///
/// let config = GameConfig::default().with_seed(7);
/// assert_eq!(config.total_turns, 8);
/// assert_eq!(config.deck.len(), 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Turns in the whole game, both sides combined.
    pub total_turns: u8,

    /// Cards dealt to each side before the first turn.
    pub starting_hand: usize,

    /// Cards drawn at the start of each turn.
    pub draws_per_turn: usize,

    /// The shared deck list.
    pub deck: Vec<Archetype>,

    /// RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Scripted opponent tuning.
    pub opponent: OpponentConfig,

    /// Driver delays.
    pub pacing: PacingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_turns: 8,
            starting_hand: 2,
            draws_per_turn: 1,
            deck: DECK_LIST.to_vec(),
            seed: None,
            opponent: OpponentConfig::default(),
            pacing: PacingConfig::default(),
        }
    }
}

impl GameConfig {
    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of turns.
    #[must_use]
    pub fn with_total_turns(mut self, total_turns: u8) -> Self {
        self.total_turns = total_turns;
        self
    }

    /// Set the starting hand size.
    #[must_use]
    pub fn with_starting_hand(mut self, starting_hand: usize) -> Self {
        self.starting_hand = starting_hand;
        self
    }

    /// Set the deck list.
    #[must_use]
    pub fn with_deck(mut self, deck: Vec<Archetype>) -> Self {
        self.deck = deck;
        self
    }

    /// Set the opponent tuning.
    #[must_use]
    pub fn with_opponent(mut self, opponent: OpponentConfig) -> Self {
        self.opponent = opponent;
        self
    }

    /// Set the pacing.
    #[must_use]
    pub fn with_pacing(mut self, pacing: PacingConfig) -> Self {
        self.pacing = pacing;
        self
    }

    /// Check the configuration before a game starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_turns == 0 {
            return Err(ConfigError::NoTurns);
        }
        if self.deck.is_empty() {
            return Err(ConfigError::EmptyDeck);
        }
        self.opponent.validate()
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
