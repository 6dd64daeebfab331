//! # Progression Engine
//!
//! Experience, gold and loot awarded when a monster is defeated.

use crate::{config, level_up, Dice, Item, ItemDatabase, LevelUpResult, Monster, Player, QuestResult};
use serde::{Deserialize, Serialize};

/// Everything a victory granted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VictoryReward {
    /// Experience awarded, bonus included
    pub exp: u32,
    /// Gold awarded, bonus included
    pub gold: u32,
    /// Whether the quick-victory bonus applied
    pub quick_victory: bool,
    /// Bonus item added to the inventory, if any
    pub loot: Option<Item>,
    /// Level gained from this victory, if any
    pub level_up: Option<LevelUpResult>,
}

/// Computes and applies victory rewards.
#[derive(Debug, Clone)]
pub struct ProgressionEngine {
    loot_pool: Vec<Item>,
}

impl ProgressionEngine {
    /// Creates an engine dropping copies of the given items as loot.
    pub fn new(loot_pool: Vec<Item>) -> Self {
        Self { loot_pool }
    }

    /// Builds the standard loot pool from the item database.
    pub fn from_database(items: &ItemDatabase) -> QuestResult<Self> {
        let loot_pool = config::LOOT_POOL
            .iter()
            .map(|key| items.instantiate(key))
            .collect::<QuestResult<Vec<_>>>()?;
        Ok(Self::new(loot_pool))
    }

    pub fn loot_pool(&self) -> &[Item] {
        &self.loot_pool
    }

    /// True when a fight that ended in `rounds` rounds earns the bonus.
    pub fn is_quick_victory(rounds: u32) -> bool {
        rounds <= config::QUICK_VICTORY_ROUNDS
    }

    /// Awards a victory over `monster` won in round `rounds`.
    ///
    /// Draw order: gold, loot chance, loot pick, then level-up gains. The
    /// quick-victory bonus never affects the loot roll. At most one level is
    /// gained, whatever the amount of experience awarded.
    pub fn award_victory<D: Dice + ?Sized>(
        &self,
        player: &mut Player,
        monster: &Monster,
        rounds: u32,
        dice: &mut D,
    ) -> VictoryReward {
        let mut exp = monster.exp_value;
        let (gold_min, gold_max) = monster.gold_drop;
        let mut gold = dice.roll(gold_min as i32, gold_max as i32).max(0) as u32;

        let quick_victory = Self::is_quick_victory(rounds);
        if quick_victory {
            exp += (exp as f64 * config::QUICK_VICTORY_EXP_BONUS) as u32;
            gold += (gold as f64 * config::QUICK_VICTORY_GOLD_BONUS) as u32;
        }

        player.exp += exp;
        player.gold += gold;

        let loot = if !self.loot_pool.is_empty() && dice.chance(config::LOOT_CHANCE) {
            let item = self.loot_pool[dice.pick(self.loot_pool.len())].clone();
            player.add_item(item.clone());
            Some(item)
        } else {
            None
        };

        let gained_level = level_up(player, dice);

        log::info!(
            "{} defeated {} in {} round(s): +{} exp, +{} gold{}",
            player.name,
            monster.name,
            rounds,
            exp,
            gold,
            if quick_victory { " (quick victory)" } else { "" }
        );

        VictoryReward {
            exp,
            gold,
            quick_victory,
            loot,
            level_up: gained_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Draw, ScriptedDice};

    fn goblin() -> Monster {
        Monster::new("Goblin", 25, 8, 2, 15, (5, 12), "A small, green-skinned creature.")
    }

    fn engine() -> ProgressionEngine {
        ProgressionEngine::from_database(&ItemDatabase::new()).unwrap()
    }

    #[test]
    fn test_loot_pool_from_database() {
        let names: Vec<_> = engine().loot_pool().iter().map(|i| i.name.clone()).collect();
        assert_eq!(names, vec!["Health Potion", "Ruby", "Iron Sword", "Leather Armor"]);
    }

    #[test]
    fn test_quick_victory_bonus() {
        let mut player = Player::new("Hero");
        let mut dice = ScriptedDice::new([Draw::Roll(10), Draw::Chance(false)]);

        let reward = engine().award_victory(&mut player, &goblin(), 2, &mut dice);
        assert!(reward.quick_victory);
        assert_eq!(reward.exp, 18); // 15 + floor(15 * 0.2)
        assert_eq!(reward.gold, 13); // 10 + floor(10 * 0.3)
        assert_eq!(player.exp, 18);
        assert_eq!(player.gold, 63);
        assert!(reward.loot.is_none());
        assert!(reward.level_up.is_none());
    }

    #[test]
    fn test_no_bonus_after_three_rounds() {
        let mut player = Player::new("Hero");
        let mut dice = ScriptedDice::new([Draw::Roll(10), Draw::Chance(false)]);

        let reward = engine().award_victory(&mut player, &goblin(), 4, &mut dice);
        assert!(!reward.quick_victory);
        assert_eq!(reward.exp, 15);
        assert_eq!(reward.gold, 10);
    }

    #[test]
    fn test_round_three_still_counts_as_quick() {
        assert!(ProgressionEngine::is_quick_victory(1));
        assert!(ProgressionEngine::is_quick_victory(3));
        assert!(!ProgressionEngine::is_quick_victory(4));
    }

    #[test]
    fn test_loot_is_added_to_inventory() {
        let mut player = Player::new("Hero");
        let mut dice = ScriptedDice::new([Draw::Roll(5), Draw::Chance(true), Draw::Pick(2)]);

        let reward = engine().award_victory(&mut player, &goblin(), 5, &mut dice);
        assert_eq!(reward.loot.as_ref().unwrap().name, "Iron Sword");
        assert_eq!(player.inventory.len(), 1);
        assert_eq!(player.inventory[0].name, "Iron Sword");
    }

    #[test]
    fn test_single_level_up_per_victory() {
        let mut player = Player::new("Hero");
        player.exp = 240;
        let dragon = Monster::new("Dragon", 200, 35, 15, 200, (100, 200), "An ancient beast.");
        let mut dice = ScriptedDice::new([Draw::Roll(100), Draw::Chance(false)]);

        let reward = engine().award_victory(&mut player, &dragon, 10, &mut dice);
        // 440 exp crosses both the 100 and the 150 thresholds, only one applies
        assert_eq!(reward.level_up.unwrap().new_level, 2);
        assert_eq!(player.level, 2);
        assert_eq!(player.exp, 340);
        assert_eq!(player.exp_to_next, 150);
    }

    #[test]
    fn test_gold_roll_stays_in_drop_range() {
        let engine = engine();
        let mut rng = crate::GameRng::new(77);
        for _ in 0..200 {
            let mut player = Player::new("Hero");
            let reward = engine.award_victory(&mut player, &goblin(), 10, &mut rng);
            assert!((5..=12).contains(&reward.gold));
        }
    }
}
