//! # Encounter Generation
//!
//! The monster template database and the generator that populates rooms with
//! monsters scaled to their distance from the village.

use crate::{Dice, GenerationConfig, Generator, Monster, QuestError, QuestResult};
use std::collections::BTreeMap;

/// Read-only monster templates keyed by snake_case name.
#[derive(Debug, Clone)]
pub struct MonsterDatabase {
    templates: BTreeMap<&'static str, Monster>,
}

impl MonsterDatabase {
    /// Creates the standard bestiary.
    pub fn new() -> Self {
        let entries = [
            ("goblin", "Goblin", 25, 8, 2, 15, (5, 12), "A small, green-skinned creature with sharp teeth."),
            ("orc", "Orc", 40, 12, 4, 25, (8, 20), "A brutish humanoid with tusks and crude weapons."),
            ("skeleton", "Skeleton", 35, 10, 6, 20, (3, 15), "Animated bones held together by dark magic."),
            ("troll", "Troll", 80, 18, 8, 50, (20, 40), "A massive creature with regenerative abilities."),
            ("dragon", "Dragon", 200, 35, 15, 200, (100, 200), "An ancient, fire-breathing beast of legend."),
            ("wolf", "Wolf", 30, 14, 3, 18, (6, 15), "A fierce predator with sharp fangs."),
            ("spider", "Giant Spider", 20, 6, 1, 12, (3, 8), "An oversized arachnid with venomous fangs."),
            ("bandit", "Bandit", 45, 16, 5, 30, (15, 35), "A highway robber armed and dangerous."),
        ];

        let templates = entries
            .into_iter()
            .map(|(key, name, health, attack, defense, exp, gold, description)| {
                (key, Monster::new(name, health, attack, defense, exp, gold, description))
            })
            .collect();

        Self { templates }
    }

    pub fn get(&self, key: &str) -> Option<&Monster> {
        self.templates.get(key)
    }

    /// Returns a fresh, full-health copy of a template.
    ///
    /// # Examples
    ///
    /// ```
    /// use dragonquest::MonsterDatabase;
    ///
    /// let bestiary = MonsterDatabase::new();
    /// let goblin = bestiary.spawn("goblin").unwrap();
    /// assert_eq!(goblin.health, 25);
    /// assert_eq!(goblin.gold_drop, (5, 12));
    /// ```
    pub fn spawn(&self, key: &str) -> QuestResult<Monster> {
        self.get(key)
            .cloned()
            .ok_or_else(|| QuestError::UnknownTemplate(key.to_string()))
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.templates.keys().copied().collect()
    }
}

impl Default for MonsterDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// Populates one room with monsters.
///
/// Difficulty is the room's Manhattan distance from the village. Stronger
/// monsters join the pool further out: trolls and bandits from difficulty 3,
/// dragons from difficulty 4.
pub struct EncounterGenerator<'a> {
    database: &'a MonsterDatabase,
    difficulty: u32,
}

impl<'a> EncounterGenerator<'a> {
    pub fn new(database: &'a MonsterDatabase, difficulty: u32) -> Self {
        Self {
            database,
            difficulty,
        }
    }

    /// Monster keys available at this difficulty.
    pub fn pool(&self) -> Vec<&'static str> {
        let mut pool = vec!["goblin", "orc", "skeleton", "wolf", "spider"];
        if self.difficulty >= 3 {
            pool.extend(["troll", "bandit"]);
        }
        if self.difficulty >= 4 {
            pool.push("dragon");
        }
        pool
    }

    fn max_count(&self, config: &GenerationConfig) -> u32 {
        config.max_monsters_per_room.min(self.difficulty).max(1)
    }
}

impl Generator<Vec<Monster>> for EncounterGenerator<'_> {
    fn generate(&self, config: &GenerationConfig, dice: &mut dyn Dice) -> QuestResult<Vec<Monster>> {
        if !dice.chance(config.monster_chance) {
            return Ok(Vec::new());
        }

        let count = dice.roll(1, self.max_count(config) as i32);
        let pool = self.pool();
        (0..count)
            .map(|_| self.database.spawn(pool[dice.pick(pool.len())]))
            .collect()
    }

    fn validate(&self, content: &Vec<Monster>, config: &GenerationConfig) -> QuestResult<()> {
        if content.len() as u32 > self.max_count(config) {
            return Err(QuestError::GenerationFailed(format!(
                "Encounter of {} monsters exceeds limit at difficulty {}",
                content.len(),
                self.difficulty
            )));
        }
        if content.iter().any(|m| !m.is_alive()) {
            return Err(QuestError::GenerationFailed(
                "Encounter contains a dead monster".to_string(),
            ));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "EncounterGenerator"
    }
}
