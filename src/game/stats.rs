//! # Stat Model
//!
//! Derived combat numbers: total attack and defense, damage mitigation, and
//! level-ups.

use crate::{config, Dice, Player};
use serde::{Deserialize, Serialize};

/// Stat increases granted by a single level-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpResult {
    pub new_level: u32,
    pub health_gain: i32,
    pub attack_gain: i32,
    pub defense_gain: i32,
}

/// Base attack plus the equipped weapon's bonus.
pub fn total_attack(player: &Player) -> i32 {
    player.attack + player.equipped_weapon.as_ref().map_or(0, |w| w.effect)
}

/// Base defense plus the equipped armor's bonus.
pub fn total_defense(player: &Player) -> i32 {
    player.defense + player.equipped_armor.as_ref().map_or(0, |a| a.effect)
}

/// Damage left after defense, never less than 1.
///
/// # Examples
///
/// ```
/// use dragonquest::mitigate;
///
/// assert_eq!(mitigate(16, 2), 14);
/// assert_eq!(mitigate(3, 50), 1);
/// ```
pub fn mitigate(incoming_damage: i32, defender_defense: i32) -> i32 {
    (incoming_damage - defender_defense).max(1)
}

/// Applies incoming damage to a health pool.
///
/// Returns `(new_health, actual_damage)`. Health never drops below 0 and
/// `actual_damage` is always at least 1, so a fight always ends.
pub fn apply_damage(defender_health: i32, incoming_damage: i32, defender_defense: i32) -> (i32, i32) {
    let actual_damage = mitigate(incoming_damage, defender_defense);
    ((defender_health - actual_damage).max(0), actual_damage)
}

/// Levels the player up once if enough experience has been banked.
///
/// Only one level is gained per call even when `exp` covers several
/// thresholds; the remainder stays banked for the next call. Returns `None`
/// without touching the player when `exp < exp_to_next`.
pub fn level_up<D: Dice + ?Sized>(player: &mut Player, dice: &mut D) -> Option<LevelUpResult> {
    if player.exp < player.exp_to_next {
        return None;
    }

    player.level += 1;
    player.exp -= player.exp_to_next;
    player.exp_to_next = (player.exp_to_next as f64 * config::EXP_GROWTH) as u32;

    let (health_low, health_high) = config::LEVEL_HEALTH_GAIN;
    let (attack_low, attack_high) = config::LEVEL_ATTACK_GAIN;
    let (defense_low, defense_high) = config::LEVEL_DEFENSE_GAIN;
    let health_gain = dice.roll(health_low, health_high);
    let attack_gain = dice.roll(attack_low, attack_high);
    let defense_gain = dice.roll(defense_low, defense_high);

    player.max_health += health_gain;
    player.health = player.max_health;
    player.attack += attack_gain;
    player.defense += defense_gain;

    log::info!(
        "{} reached level {} (+{} health, +{} attack, +{} defense)",
        player.name,
        player.level,
        health_gain,
        attack_gain,
        defense_gain
    );

    Some(LevelUpResult {
        new_level: player.level,
        health_gain,
        attack_gain,
        defense_gain,
    })
}
