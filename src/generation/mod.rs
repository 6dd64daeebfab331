//! # Generation Module
//!
//! Template databases and procedural world generation.
//!
//! This module provides the read-only item and monster templates every game
//! copies from, and the generators that populate the grid world with rooms,
//! encounters and loot.

pub mod encounters;
pub mod items;
pub mod grid;

pub use encounters::*;
pub use items::*;
pub use grid::*;

use crate::{Dice, GameRng, QuestResult};
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
///
/// Controls the size of the world and how densely it is populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Rooms span `-radius..=radius` on both axes
    pub radius: i32,
    /// Probability that a room has monsters (0.0 to 1.0)
    pub monster_chance: f64,
    /// Probability that a room has an item (0.0 to 1.0)
    pub item_chance: f64,
    /// Upper bound on monsters in one room
    pub max_monsters_per_room: u32,
}

impl GenerationConfig {
    /// Creates the standard configuration: a 5x5 grid.
    ///
    /// # Examples
    ///
    /// ```
    /// use dragonquest::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(42);
    /// assert_eq!(config.radius, 2);
    /// assert_eq!(config.room_count(), 25);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            radius: 2,
            monster_chance: 0.6,
            item_chance: 0.4,
            max_monsters_per_room: 3,
        }
    }

    /// Creates a configuration for testing: every room is populated.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            radius: 2,
            monster_chance: 1.0,
            item_chance: 1.0,
            max_monsters_per_room: 3,
        }
    }

    /// Number of rooms the world will contain.
    pub fn room_count(&self) -> usize {
        let side = (self.radius * 2 + 1).max(0) as usize;
        side * side
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
///
/// All generation systems implement this trait so they can be driven from a
/// single configuration and random source.
pub trait Generator<T> {
    /// Generates content using the provided configuration and dice.
    fn generate(&self, config: &GenerationConfig, dice: &mut dyn Dice) -> QuestResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> QuestResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation.
pub mod utils {
    use super::*;

    /// Creates a seeded random source from the config.
    pub fn create_rng(config: &GenerationConfig) -> GameRng {
        GameRng::new(config.seed)
    }
}
