//! # Game Module
//!
//! Core game rules, entities and the state that composes them.
//!
//! This module contains the fundamental building blocks of Dragon's Quest:
//! - Players, monsters and items
//! - The stat model, combat engine and progression engine
//! - Weather, quests and crafting
//! - The grid world and the game state that owns everything

pub mod combat;
pub mod crafting;
pub mod entities;
pub mod progression;
pub mod quests;
pub mod state;
pub mod stats;
pub mod weather;
pub mod world;

pub use combat::*;
pub use crafting::*;
pub use entities::*;
pub use progression::*;
pub use quests::*;
pub use state::*;
pub use stats::*;
pub use weather::*;
pub use world::*;

use crate::{QuestError, QuestResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents a 2D coordinate on the world grid.
///
/// North is +y, east is +x.
///
/// # Examples
///
/// ```
/// use dragonquest::Position;
///
/// let pos = Position::new(1, -2);
/// assert_eq!(pos.x, 1);
/// assert_eq!(pos.y, -2);
/// assert_eq!(pos.manhattan_distance(Position::origin()), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the Manhattan distance to another position.
    pub fn manhattan_distance(self, other: Position) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    /// Returns the neighbouring position in the given direction.
    pub fn step(self, direction: Direction) -> Position {
        self + direction.to_delta()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Directions of travel between rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use dragonquest::{Direction, Position};
    ///
    /// assert_eq!(Direction::North.to_delta(), Position::new(0, 1));
    /// assert_eq!(Direction::West.to_delta(), Position::new(-1, 0));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, 1),
            Direction::South => Position::new(0, -1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Returns all 4 directions in display order.
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }

    /// Lowercase name used by the text driver.
    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

impl FromStr for Direction {
    type Err = QuestError;

    fn from_str(s: &str) -> QuestResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "north" | "n" => Ok(Direction::North),
            "south" | "s" => Ok(Direction::South),
            "east" | "e" => Ok(Direction::East),
            "west" | "w" => Ok(Direction::West),
            other => Err(QuestError::InvalidAction(format!(
                "Invalid direction '{}'. Use north, south, east, or west",
                other
            ))),
        }
    }
}
