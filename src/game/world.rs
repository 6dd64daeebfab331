//! # World Representation
//!
//! The grid of rooms the player explores. Each room owns its monsters and
//! items; combat moves monsters out of and back into these lists.

use crate::{Direction, Item, Monster, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    Forest,
    Cave,
    Ruins,
    Mountain,
    Swamp,
    Desert,
    Village,
    Dungeon,
    Tower,
    Library,
    Armory,
    Treasury,
}

impl RoomKind {
    /// Every kind a generated room can take.
    pub const ALL: [RoomKind; 12] = [
        RoomKind::Forest,
        RoomKind::Cave,
        RoomKind::Ruins,
        RoomKind::Mountain,
        RoomKind::Swamp,
        RoomKind::Desert,
        RoomKind::Village,
        RoomKind::Dungeon,
        RoomKind::Tower,
        RoomKind::Library,
        RoomKind::Armory,
        RoomKind::Treasury,
    ];

    pub fn description(self) -> &'static str {
        match self {
            RoomKind::Forest => "A dense woodland with towering trees and dappled sunlight.",
            RoomKind::Cave => "A dark cavern with echoing drips and mysterious shadows.",
            RoomKind::Ruins => "Ancient stone structures covered in moss and ivy.",
            RoomKind::Mountain => "Rocky peaks with thin air and treacherous paths.",
            RoomKind::Swamp => "Murky wetlands with twisted trees and strange sounds.",
            RoomKind::Desert => "Endless sand dunes under a scorching sun.",
            RoomKind::Village => "A peaceful village with friendly merchants and warm hearths.",
            RoomKind::Dungeon => "A foreboding underground chamber filled with danger.",
            RoomKind::Tower => "A tall spire reaching toward the clouds.",
            RoomKind::Library => "A repository of ancient knowledge and dusty tomes.",
            RoomKind::Armory => "A weapons cache left behind by long-dead warriors.",
            RoomKind::Treasury => "A vault that once held great riches.",
        }
    }
}

impl fmt::Display for RoomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoomKind::Forest => "Forest",
            RoomKind::Cave => "Cave",
            RoomKind::Ruins => "Ruins",
            RoomKind::Mountain => "Mountain",
            RoomKind::Swamp => "Swamp",
            RoomKind::Desert => "Desert",
            RoomKind::Village => "Village",
            RoomKind::Dungeon => "Dungeon",
            RoomKind::Tower => "Tower",
            RoomKind::Library => "Library",
            RoomKind::Armory => "Armory",
            RoomKind::Treasury => "Treasury",
        };
        f.write_str(name)
    }
}

/// A single location on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub position: Position,
    pub kind: RoomKind,
    pub description: String,
    /// Monsters in fight order; the first one is engaged
    pub monsters: Vec<Monster>,
    pub items: Vec<Item>,
    /// Whether a merchant trades here
    pub shop: bool,
}

impl Room {
    /// Creates an empty room with the kind's standard description.
    pub fn new(position: Position, kind: RoomKind) -> Self {
        Self {
            position,
            kind,
            description: kind.description().to_string(),
            monsters: Vec::new(),
            items: Vec::new(),
            shop: false,
        }
    }

    /// Creates the safe starting village with a shop.
    pub fn village(position: Position) -> Self {
        Self {
            shop: true,
            ..Self::new(position, RoomKind::Village)
        }
    }

    pub fn has_monsters(&self) -> bool {
        !self.monsters.is_empty()
    }
}

/// The explorable grid of rooms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    rooms: Vec<Room>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a room, replacing any room already at the same position.
    pub fn insert_room(&mut self, room: Room) {
        match self.rooms.iter_mut().find(|r| r.position == room.position) {
            Some(existing) => *existing = room,
            None => self.rooms.push(room),
        }
    }

    pub fn room(&self, position: Position) -> Option<&Room> {
        self.rooms.iter().find(|r| r.position == position)
    }

    pub fn room_mut(&mut self, position: Position) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|r| r.position == position)
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn contains(&self, position: Position) -> bool {
        self.room(position).is_some()
    }

    /// Monsters at a location, empty for unknown locations.
    pub fn monsters_at(&self, position: Position) -> &[Monster] {
        self.room(position)
            .map(|r| r.monsters.as_slice())
            .unwrap_or(&[])
    }

    pub fn monsters_at_mut(&mut self, position: Position) -> Option<&mut Vec<Monster>> {
        self.room_mut(position).map(|r| &mut r.monsters)
    }

    /// Items lying at a location, empty for unknown locations.
    pub fn items_at(&self, position: Position) -> &[Item] {
        self.room(position)
            .map(|r| r.items.as_slice())
            .unwrap_or(&[])
    }

    pub fn items_at_mut(&mut self, position: Position) -> Option<&mut Vec<Item>> {
        self.room_mut(position).map(|r| &mut r.items)
    }

    /// Directions leading to an existing room.
    pub fn exits(&self, position: Position) -> Vec<Direction> {
        Direction::all()
            .into_iter()
            .filter(|d| self.contains(position.step(*d)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_world() -> World {
        let mut world = World::new();
        world.insert_room(Room::village(Position::origin()));
        let mut cave = Room::new(Position::new(0, 1), RoomKind::Cave);
        cave.monsters.push(Monster::new("Goblin", 25, 8, 2, 15, (5, 12), ""));
        world.insert_room(cave);
        world
    }

    #[test]
    fn test_room_lookup() {
        let world = small_world();
        assert!(world.contains(Position::origin()));
        assert!(world.room(Position::origin()).unwrap().shop);
        assert_eq!(world.monsters_at(Position::new(0, 1)).len(), 1);
        assert!(world.monsters_at(Position::new(9, 9)).is_empty());
        assert!(world.items_at(Position::origin()).is_empty());
    }

    #[test]
    fn test_exits() {
        let world = small_world();
        assert_eq!(world.exits(Position::origin()), vec![Direction::North]);
        assert_eq!(world.exits(Position::new(0, 1)), vec![Direction::South]);
    }

    #[test]
    fn test_insert_replaces_existing_room() {
        let mut world = small_world();
        world.insert_room(Room::new(Position::new(0, 1), RoomKind::Forest));
        assert_eq!(world.rooms().len(), 2);
        assert_eq!(world.room(Position::new(0, 1)).unwrap().kind, RoomKind::Forest);
        assert!(!world.room(Position::new(0, 1)).unwrap().has_monsters());
    }

    #[test]
    fn test_monster_list_is_mutable_in_place() {
        let mut world = small_world();
        world.monsters_at_mut(Position::new(0, 1)).unwrap().clear();
        assert!(world.monsters_at(Position::new(0, 1)).is_empty());
        assert!(world.monsters_at_mut(Position::new(5, 5)).is_none());
    }
}
