//! # Crafting
//!
//! Recipes that combine inventory items into a better template item.

use crate::{Item, ItemDatabase, Player, QuestError, QuestResult};
use serde::{Deserialize, Serialize};

/// A recipe consuming materials by item key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// (item key, count) pairs
    pub materials: &'static [(&'static str, usize)],
    /// Item database key of the product
    pub result: &'static str,
}

/// One material the player is short of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingMaterial {
    pub material: String,
    pub have: usize,
    pub need: usize,
}

/// The fixed set of known recipes.
#[derive(Debug, Clone)]
pub struct CraftingBook {
    recipes: Vec<Recipe>,
}

impl CraftingBook {
    pub fn new() -> Self {
        let recipes = vec![
            Recipe {
                id: "improved_sword",
                name: "Improved Sword",
                description: "Enhance an iron sword with a ruby",
                materials: &[("iron_sword", 1), ("ruby", 1)],
                result: "steel_sword",
            },
            Recipe {
                id: "reinforced_armor",
                name: "Reinforced Armor",
                description: "Strengthen chain mail with an emerald",
                materials: &[("chain_mail", 1), ("emerald", 1)],
                result: "plate_armor",
            },
            Recipe {
                id: "super_potion",
                name: "Super Health Potion",
                description: "Combine potions with diamond dust for greater effect",
                materials: &[("health_potion", 2), ("diamond", 1)],
                result: "greater_health_potion",
            },
        ];
        Self { recipes }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Looks up a recipe by id; spaces and case are ignored.
    pub fn recipe(&self, name: &str) -> Option<&Recipe> {
        let id = name.trim().to_lowercase().replace(' ', "_");
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Materials the player lacks for `recipe`, empty when it can be crafted.
    pub fn missing_materials(&self, recipe: &Recipe, player: &Player) -> Vec<MissingMaterial> {
        recipe
            .materials
            .iter()
            .filter_map(|&(material, need)| {
                let have = player.count_key(material);
                (have < need).then(|| MissingMaterial {
                    material: material.to_string(),
                    have,
                    need,
                })
            })
            .collect()
    }

    /// Consumes the materials for `name` and adds the product to the inventory.
    ///
    /// Nothing is removed unless every material is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use dragonquest::{CraftingBook, ItemDatabase, Player};
    ///
    /// let items = ItemDatabase::new();
    /// let book = CraftingBook::new();
    /// let mut player = Player::new("Smith");
    /// player.add_item(items.instantiate("iron_sword").unwrap());
    /// player.add_item(items.instantiate("ruby").unwrap());
    ///
    /// let product = book.craft("improved sword", &mut player, &items).unwrap();
    /// assert_eq!(product.name, "Steel Sword");
    /// assert_eq!(player.inventory.len(), 1);
    /// ```
    pub fn craft(&self, name: &str, player: &mut Player, items: &ItemDatabase) -> QuestResult<Item> {
        let recipe = self
            .recipe(name)
            .ok_or_else(|| QuestError::UnknownTemplate(name.to_string()))?;

        let missing = self.missing_materials(recipe, player);
        if !missing.is_empty() {
            return Err(QuestError::MissingMaterials {
                recipe: recipe.name.to_string(),
                missing,
            });
        }

        let product = items.instantiate(recipe.result)?;
        for &(material, need) in recipe.materials {
            for _ in 0..need {
                if let Some(index) = player.inventory.iter().position(|i| i.key() == material) {
                    player.take_item(index)?;
                }
            }
        }

        player.add_item(product.clone());
        log::info!("{} crafted {}", player.name, product.name);
        Ok(product)
    }
}

impl Default for CraftingBook {
    fn default() -> Self {
        Self::new()
    }
}
