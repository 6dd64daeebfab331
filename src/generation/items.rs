//! # Item Generation
//!
//! The item template database and the generator that places loot in rooms.

use crate::{Dice, GenerationConfig, Generator, Item, ItemType, QuestError, QuestResult, RoomKind};
use std::collections::BTreeMap;

/// Read-only item templates keyed by snake_case name.
///
/// Callers receive copies; templates are never handed out mutably.
#[derive(Debug, Clone)]
pub struct ItemDatabase {
    templates: BTreeMap<&'static str, Item>,
}

impl ItemDatabase {
    /// Creates the standard item database.
    ///
    /// # Examples
    ///
    /// ```
    /// use dragonquest::ItemDatabase;
    ///
    /// let items = ItemDatabase::new();
    /// let sword = items.instantiate("iron_sword").unwrap();
    /// assert_eq!(sword.effect, 12);
    /// assert!(items.instantiate("excalibur").is_err());
    /// ```
    pub fn new() -> Self {
        use ItemType::*;

        let entries = [
            ("rusty_sword", "Rusty Sword", Weapon, 25, "An old but serviceable blade.", 5),
            ("iron_sword", "Iron Sword", Weapon, 100, "A well-crafted iron weapon.", 12),
            ("steel_sword", "Steel Sword", Weapon, 250, "A sharp steel blade that gleams.", 20),
            ("dragon_sword", "Dragon Sword", Weapon, 1000, "A legendary blade forged from dragon scales.", 35),
            ("leather_armor", "Leather Armor", Armor, 50, "Basic protection made from tanned hide.", 3),
            ("chain_mail", "Chain Mail", Armor, 150, "Interlocked metal rings provide good defense.", 8),
            ("plate_armor", "Plate Armor", Armor, 400, "Heavy metal plates offer excellent protection.", 15),
            ("dragon_armor", "Dragon Armor", Armor, 1200, "Armor crafted from dragon hide.", 25),
            ("health_potion", "Health Potion", Potion, 20, "Restores 30 health points.", 30),
            ("greater_health_potion", "Greater Health Potion", Potion, 50, "Restores 60 health points.", 60),
            ("gold_coins", "Gold Coins", Treasure, 0, "Shiny gold coins.", 0),
            ("ruby", "Ruby", Treasure, 200, "A precious red gem.", 0),
            ("emerald", "Emerald", Treasure, 300, "A valuable green stone.", 0),
            ("diamond", "Diamond", Treasure, 500, "A brilliant crystal of immense value.", 0),
        ];

        let templates = entries
            .into_iter()
            .map(|(key, name, item_type, value, description, effect)| {
                (key, Item::new(name, item_type, value, description, effect))
            })
            .collect();

        Self { templates }
    }

    /// Borrows a template.
    pub fn get(&self, key: &str) -> Option<&Item> {
        self.templates.get(key)
    }

    /// Returns a fresh copy of a template.
    pub fn instantiate(&self, key: &str) -> QuestResult<Item> {
        self.get(key)
            .cloned()
            .ok_or_else(|| QuestError::UnknownTemplate(key.to_string()))
    }

    /// All template keys in sorted order.
    pub fn keys(&self) -> Vec<&'static str> {
        self.templates.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for ItemDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// Item keys a treasury room may hold.
const TREASURY_LOOT: [&str; 5] = ["ruby", "emerald", "diamond", "steel_sword", "dragon_armor"];

/// Item keys an armory room may hold.
const ARMORY_LOOT: [&str; 4] = ["iron_sword", "steel_sword", "chain_mail", "plate_armor"];

/// Places at most one item in a room of the given kind.
pub struct ItemGenerator<'a> {
    database: &'a ItemDatabase,
    room_kind: RoomKind,
}

impl<'a> ItemGenerator<'a> {
    pub fn new(database: &'a ItemDatabase, room_kind: RoomKind) -> Self {
        Self {
            database,
            room_kind,
        }
    }

    /// Keys this room kind draws from.
    fn pool(&self) -> Vec<&'static str> {
        match self.room_kind {
            RoomKind::Treasury => TREASURY_LOOT.to_vec(),
            RoomKind::Armory => ARMORY_LOOT.to_vec(),
            _ => self.database.keys(),
        }
    }
}

impl Generator<Vec<Item>> for ItemGenerator<'_> {
    fn generate(&self, config: &GenerationConfig, dice: &mut dyn Dice) -> QuestResult<Vec<Item>> {
        if !dice.chance(config.item_chance) {
            return Ok(Vec::new());
        }
        let pool = self.pool();
        let key = pool[dice.pick(pool.len())];
        Ok(vec![self.database.instantiate(key)?])
    }

    fn validate(&self, content: &Vec<Item>, _config: &GenerationConfig) -> QuestResult<()> {
        if content.len() > 1 {
            return Err(QuestError::GenerationFailed(format!(
                "{} rooms hold at most one item, got {}",
                self.room_kind,
                content.len()
            )));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "ItemGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Draw, GameRng, ScriptedDice};

    #[test]
    fn test_database_contents() {
        let items = ItemDatabase::new();
        assert_eq!(items.len(), 14);
        assert_eq!(items.get("dragon_armor").unwrap().effect, 25);
        assert_eq!(items.get("greater_health_potion").unwrap().item_type, ItemType::Potion);
        assert_eq!(items.get("gold_coins").unwrap().value, 0);
    }

    #[test]
    fn test_instantiate_returns_independent_copies() {
        let items = ItemDatabase::new();
        let mut copy = items.instantiate("ruby").unwrap();
        copy.name.push_str(" (cracked)");
        assert_eq!(items.get("ruby").unwrap().name, "Ruby");
    }

    #[test]
    fn test_template_keys_match_names() {
        let items = ItemDatabase::new();
        for key in items.keys() {
            assert_eq!(items.get(key).unwrap().key(), key);
        }
    }

    #[test]
    fn test_generator_respects_item_chance() {
        let items = ItemDatabase::new();
        let generator = ItemGenerator::new(&items, RoomKind::Forest);
        let config = GenerationConfig::new(1);
        let mut dice = ScriptedDice::new([Draw::Chance(false)]);
        assert!(generator.generate(&config, &mut dice).unwrap().is_empty());
    }

    #[test]
    fn test_treasury_and_armory_pools() {
        let items = ItemDatabase::new();
        let config = GenerationConfig::for_testing(5);
        let mut rng = GameRng::new(5);

        let treasury = ItemGenerator::new(&items, RoomKind::Treasury);
        let armory = ItemGenerator::new(&items, RoomKind::Armory);
        for _ in 0..50 {
            let loot = treasury.generate(&config, &mut rng).unwrap();
            assert!(TREASURY_LOOT.contains(&loot[0].key().as_str()));
            treasury.validate(&loot, &config).unwrap();

            let loot = armory.generate(&config, &mut rng).unwrap();
            assert!(ARMORY_LOOT.contains(&loot[0].key().as_str()));
        }
    }
}
