//! # Dragon's Quest
//!
//! A single-player, turn-based text adventure with a seedable combat and
//! progression engine.
//!
//! ## Architecture Overview
//!
//! The core of the crate is the combat resolution and player-progression
//! engine. Everything else is an ordinary collaborator composed around it:
//!
//! - **Stats**: Derived combat numbers, damage mitigation and level-ups
//! - **Combat**: The per-round battle state machine
//! - **Progression**: Experience, gold and loot awarded on victory
//! - **Weather**: Game-wide weather that scales the player's damage
//! - **Generation**: Template databases and the grid world generator
//! - **Game State**: The composition root that owns every subsystem
//!
//! All randomness flows through the [`Dice`] trait, so any game can be
//! replayed from its seed.

pub mod game;
pub mod generation;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use utils::*;

/// Core error type for the Dragon's Quest engine.
#[derive(thiserror::Error, Debug)]
pub enum QuestError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Action cannot be performed; the round or turn is not consumed
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Combat was requested where no monster is present
    #[error("There are no enemies to fight here")]
    NoActiveEncounter,

    /// A template database lookup failed
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// A crafting recipe lacks materials
    #[error("Missing materials for {recipe}: {}", format_missing(.missing))]
    MissingMaterials {
        recipe: String,
        missing: Vec<MissingMaterial>,
    },

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Dragon's Quest codebase.
pub type QuestResult<T> = Result<T, QuestError>;

fn format_missing(missing: &[MissingMaterial]) -> String {
    missing
        .iter()
        .map(|m| format!("{} {}/{}", m.material, m.have, m.need))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Starting and base maximum health of a new player
    pub const DEFAULT_PLAYER_HEALTH: i32 = 100;

    /// Base attack of a new player
    pub const DEFAULT_PLAYER_ATTACK: i32 = 15;

    /// Base defense of a new player
    pub const DEFAULT_PLAYER_DEFENSE: i32 = 5;

    /// Experience required for the first level-up
    pub const DEFAULT_EXP_TO_NEXT: u32 = 100;

    /// Gold a new player starts with
    pub const DEFAULT_PLAYER_GOLD: u32 = 50;

    /// Player damage spread around total attack
    pub const PLAYER_DAMAGE_SPREAD: i32 = 3;

    /// Monster damage spread around its attack
    pub const MONSTER_DAMAGE_SPREAD: i32 = 2;

    /// Chance that a player attack is a critical hit
    pub const CRIT_CHANCE: f64 = 0.1;

    /// Multiplier applied to mitigated damage on a critical hit
    pub const CRIT_MULTIPLIER: i32 = 2;

    /// Escape chance before the monster's attack is subtracted
    pub const ESCAPE_BASE_CHANCE: f64 = 0.7;

    /// Victories in at most this many rounds earn the quick-victory bonus
    pub const QUICK_VICTORY_ROUNDS: u32 = 3;

    /// Fraction of base experience added by the quick-victory bonus
    pub const QUICK_VICTORY_EXP_BONUS: f64 = 0.2;

    /// Fraction of base gold added by the quick-victory bonus
    pub const QUICK_VICTORY_GOLD_BONUS: f64 = 0.3;

    /// Chance to find a bonus item after a victory
    pub const LOOT_CHANCE: f64 = 0.3;

    /// Item database keys that can drop as victory loot
    pub const LOOT_POOL: [&str; 4] = ["health_potion", "ruby", "iron_sword", "leather_armor"];

    /// Factor applied to the experience threshold on each level-up
    pub const EXP_GROWTH: f64 = 1.5;

    /// Health gained per level
    pub const LEVEL_HEALTH_GAIN: (i32, i32) = (10, 20);

    /// Attack gained per level
    pub const LEVEL_ATTACK_GAIN: (i32, i32) = (2, 5);

    /// Defense gained per level
    pub const LEVEL_DEFENSE_GAIN: (i32, i32) = (1, 3);

    /// Chance per invocation that the weather is re-rolled
    pub const WEATHER_CHANGE_CHANCE: f64 = 0.3;

    /// Health restored by a rest
    pub const REST_HEAL: (i32, i32) = (10, 25);

    /// Chance that a rest outside a village is interrupted
    pub const REST_INTERRUPT_CHANCE: f64 = 0.3;

    /// Chance of finding something while resting in forests and ruins
    pub const REST_FIND_CHANCE: f64 = 0.1;

    /// Gold found while resting
    pub const REST_FIND_GOLD: (i32, i32) = (5, 15);

    /// Turns that pass during a rest
    pub const REST_TURNS: u64 = 2;

    /// Item database keys sold by village shops, in menu order
    pub const SHOP_STOCK: [&str; 4] = [
        "health_potion",
        "greater_health_potion",
        "leather_armor",
        "iron_sword",
    ];

    /// Default save file written by the binary
    pub const SAVE_FILE_NAME: &str = "dragonquest_save.json";
}
