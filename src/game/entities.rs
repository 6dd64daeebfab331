//! # Entities
//!
//! Players, monsters and items.
//!
//! Items and monsters are plain values: every copy placed in the world, a
//! shop or an inventory is its own instance. The player owns its inventory
//! and equipment slots outright, and every move between them is an explicit
//! ownership transfer by index.

use crate::{config, Position, QuestError, QuestResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Equippable, `effect` is an attack bonus
    Weapon,
    /// Equippable, `effect` is a defense bonus
    Armor,
    /// Consumable, `effect` is the heal amount
    Potion,
    /// Valuable with no effect
    Treasure,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemType::Weapon => "weapon",
            ItemType::Armor => "armor",
            ItemType::Potion => "potion",
            ItemType::Treasure => "treasure",
        };
        f.write_str(name)
    }
}

/// An immutable item value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Price in gold
    pub value: u32,
    pub description: String,
    /// Attack bonus, defense bonus or heal amount depending on type
    pub effect: i32,
}

impl Item {
    /// Creates a new item.
    pub fn new(
        name: impl Into<String>,
        item_type: ItemType,
        value: u32,
        description: impl Into<String>,
        effect: i32,
    ) -> Self {
        Self {
            name: name.into(),
            item_type,
            value,
            description: description.into(),
            effect,
        }
    }

    /// Key form of the name: lowercase with spaces replaced by underscores.
    ///
    /// # Examples
    ///
    /// ```
    /// use dragonquest::{Item, ItemType};
    ///
    /// let item = Item::new("Iron Sword", ItemType::Weapon, 100, "", 12);
    /// assert_eq!(item.key(), "iron_sword");
    /// ```
    pub fn key(&self) -> String {
        self.name.to_lowercase().replace(' ', "_")
    }

    /// Case-insensitive substring match against the item name.
    pub fn matches(&self, fragment: &str) -> bool {
        let fragment = fragment.trim().to_lowercase();
        !fragment.is_empty() && self.name.to_lowercase().contains(&fragment)
    }

    pub fn is_potion(&self) -> bool {
        self.item_type == ItemType::Potion
    }
}

/// A monster instance, copied from a template for each room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
    pub defense: i32,
    pub exp_value: u32,
    /// Inclusive gold drop range
    pub gold_drop: (u32, u32),
    pub description: String,
}

impl Monster {
    /// Creates a monster at full health.
    pub fn new(
        name: impl Into<String>,
        max_health: i32,
        attack: i32,
        defense: i32,
        exp_value: u32,
        gold_drop: (u32, u32),
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            health: max_health,
            max_health,
            attack,
            defense,
            exp_value,
            gold_drop,
            description: description.into(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Equipment slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipSlot {
    Weapon,
    Armor,
}

impl std::str::FromStr for EquipSlot {
    type Err = QuestError;

    fn from_str(s: &str) -> QuestResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "weapon" | "sword" => Ok(EquipSlot::Weapon),
            "armor" => Ok(EquipSlot::Armor),
            _ => Err(QuestError::InvalidAction(
                "Invalid item type. Use 'weapon' or 'armor'".to_string(),
            )),
        }
    }
}

/// The player character.
///
/// # Examples
///
/// ```
/// use dragonquest::Player;
///
/// let player = Player::new("Hero");
/// assert_eq!(player.health, 100);
/// assert_eq!(player.level, 1);
/// assert!(player.is_alive());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    /// Base attack before equipment
    pub attack: i32,
    /// Base defense before equipment
    pub defense: i32,
    pub level: u32,
    pub exp: u32,
    pub exp_to_next: u32,
    pub gold: u32,
    pub inventory: Vec<Item>,
    pub equipped_weapon: Option<Item>,
    pub equipped_armor: Option<Item>,
    pub location: Position,
}

impl Player {
    /// Creates a new level 1 player at the origin.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            health: config::DEFAULT_PLAYER_HEALTH,
            max_health: config::DEFAULT_PLAYER_HEALTH,
            attack: config::DEFAULT_PLAYER_ATTACK,
            defense: config::DEFAULT_PLAYER_DEFENSE,
            level: 1,
            exp: 0,
            exp_to_next: config::DEFAULT_EXP_TO_NEXT,
            gold: config::DEFAULT_PLAYER_GOLD,
            inventory: Vec::new(),
            equipped_weapon: None,
            equipped_armor: None,
            location: Position::origin(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Heals up to `max_health` and returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let old_health = self.health;
        self.health = self.max_health.min(self.health + amount.max(0));
        self.health - old_health
    }

    /// Appends an item to the inventory.
    pub fn add_item(&mut self, item: Item) {
        self.inventory.push(item);
    }

    /// Removes and returns the item at `index`.
    pub fn take_item(&mut self, index: usize) -> QuestResult<Item> {
        if index >= self.inventory.len() {
            return Err(QuestError::InvalidAction(format!(
                "No item in inventory slot {}",
                index + 1
            )));
        }
        Ok(self.inventory.remove(index))
    }

    /// Index of the first inventory item whose name contains `fragment`.
    pub fn find_item(&self, fragment: &str) -> Option<usize> {
        self.inventory.iter().position(|item| item.matches(fragment))
    }

    /// Inventory indices of every potion, in inventory order.
    pub fn potion_indices(&self) -> Vec<usize> {
        self.inventory
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_potion())
            .map(|(index, _)| index)
            .collect()
    }

    /// Number of inventory items whose key equals `key`.
    pub fn count_key(&self, key: &str) -> usize {
        self.inventory.iter().filter(|item| item.key() == key).count()
    }

    /// Drinks the potion at `index`, returning it with the amount healed.
    ///
    /// Anything other than a potion is rejected and left in place.
    pub fn drink_potion(&mut self, index: usize) -> QuestResult<(Item, i32)> {
        match self.inventory.get(index) {
            Some(item) if item.is_potion() => {}
            Some(item) => {
                return Err(QuestError::InvalidAction(format!(
                    "You cannot use {}",
                    item.name
                )))
            }
            None => {
                return Err(QuestError::InvalidAction(format!(
                    "No item in inventory slot {}",
                    index + 1
                )))
            }
        }

        let potion = self.take_item(index)?;
        let healed = self.heal(potion.effect);
        Ok((potion, healed))
    }

    /// Equips the weapon or armor at `index`.
    ///
    /// The previously equipped item in that slot goes back to the end of the
    /// inventory. Returns the slot that was filled.
    pub fn equip(&mut self, index: usize) -> QuestResult<EquipSlot> {
        let slot = match self.inventory.get(index).map(|item| item.item_type) {
            Some(ItemType::Weapon) => EquipSlot::Weapon,
            Some(ItemType::Armor) => EquipSlot::Armor,
            Some(_) => {
                return Err(QuestError::InvalidAction(
                    "You cannot equip that item".to_string(),
                ))
            }
            None => {
                return Err(QuestError::InvalidAction(format!(
                    "No item in inventory slot {}",
                    index + 1
                )))
            }
        };

        let item = self.inventory.remove(index);
        let previous = match slot {
            EquipSlot::Weapon => self.equipped_weapon.replace(item),
            EquipSlot::Armor => self.equipped_armor.replace(item),
        };
        if let Some(previous) = previous {
            self.inventory.push(previous);
        }
        Ok(slot)
    }

    /// Moves the item in `slot` back into the inventory and returns its name.
    pub fn unequip(&mut self, slot: EquipSlot) -> QuestResult<String> {
        let item = match slot {
            EquipSlot::Weapon => self.equipped_weapon.take(),
            EquipSlot::Armor => self.equipped_armor.take(),
        };
        match item {
            Some(item) => {
                let name = item.name.clone();
                self.inventory.push(item);
                Ok(name)
            }
            None => Err(QuestError::InvalidAction(match slot {
                EquipSlot::Weapon => "You don't have a weapon equipped".to_string(),
                EquipSlot::Armor => "You don't have armor equipped".to_string(),
            })),
        }
    }
}
