//! # Combat Engine
//!
//! Turn-based battles between the player and a single monster.
//!
//! A [`CombatSession`] is created against the first monster at a location
//! and advanced one round at a time by [`CombatEngine::resolve`]. Each round
//! the player acts, and unless the monster died or the player escaped, the
//! monster strikes back. A session ends in victory, flight or defeat.

use crate::{
    apply_damage, config, mitigate, total_attack, total_defense, Dice, Monster, Player,
    ProgressionEngine, QuestError, QuestResult, VictoryReward, Weather, WeatherKind,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle of a combat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatState {
    /// Waiting for the next player action
    Active,
    /// The monster was defeated and rewards were paid out
    PlayerVictory,
    /// The player escaped
    PlayerFled,
    /// The player's health reached 0
    PlayerDefeated,
}

impl CombatState {
    pub fn is_terminal(self) -> bool {
        self != CombatState::Active
    }
}

/// One player action per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatAction {
    Attack,
    /// Halve the monster's next attack
    Defend,
    Run,
    /// Drink the potion at this inventory index
    UseItem(usize),
}

impl FromStr for CombatAction {
    type Err = QuestError;

    /// Parses driver text: `a`/`attack`, `d`/`defend`, `r`/`run`/`flee`,
    /// or `u N`/`use N` with `N` counted from 1. The result holds `N - 1`;
    /// a driver listing only potions maps it to an inventory index itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use dragonquest::CombatAction;
    ///
    /// assert_eq!("a".parse::<CombatAction>().unwrap(), CombatAction::Attack);
    /// assert_eq!("use 2".parse::<CombatAction>().unwrap(), CombatAction::UseItem(1));
    /// assert!("dance".parse::<CombatAction>().is_err());
    /// ```
    fn from_str(s: &str) -> QuestResult<Self> {
        let lowered = s.trim().to_lowercase();
        let mut parts = lowered.split_whitespace();
        let verb = parts.next().unwrap_or("");
        let argument = parts.next();

        match verb {
            "a" | "attack" => Ok(CombatAction::Attack),
            "d" | "defend" => Ok(CombatAction::Defend),
            "r" | "run" | "flee" => Ok(CombatAction::Run),
            "u" | "use" => {
                let slot = argument
                    .ok_or_else(|| QuestError::InvalidAction("Use which item?".to_string()))?;
                match slot.parse::<usize>() {
                    Ok(n) if n >= 1 => Ok(CombatAction::UseItem(n - 1)),
                    _ => Err(QuestError::InvalidAction(format!(
                        "Invalid item slot '{}'",
                        slot
                    ))),
                }
            }
            _ => Err(QuestError::InvalidAction(format!(
                "Unknown combat action '{}'",
                s.trim()
            ))),
        }
    }
}

/// Something that happened during a round, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// The player hit the monster
    PlayerHit {
        damage: i32,
        critical: bool,
        monster_health: i32,
    },
    /// The player raised their guard
    Guarded,
    /// The player got away
    EscapeSucceeded,
    /// The escape attempt failed
    EscapeFailed { chance: f64 },
    /// The player drank a potion
    PotionUsed { item: String, healed: i32 },
    /// The monster hit the player
    MonsterHit {
        damage: i32,
        guarded: bool,
        player_health: i32,
    },
    /// The monster died
    MonsterDefeated { name: String },
    /// Rewards paid for the victory
    Rewarded(VictoryReward),
    /// The player died
    PlayerDefeated { killer: String },
}

/// Read-only view of a session for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub round: u32,
    pub player_health: i32,
    pub player_max_health: i32,
    pub monster_name: String,
    pub monster_health: i32,
    pub monster_max_health: i32,
    pub weather: WeatherKind,
}

/// Outcome of one resolved round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    /// Round number this report covers
    pub round: u32,
    pub events: Vec<CombatEvent>,
    /// State after the round
    pub state: CombatState,
}

/// One engagement between the player and a single monster.
#[derive(Debug, Clone)]
pub struct CombatSession {
    monster: Monster,
    weather: WeatherKind,
    round: u32,
    guarding: bool,
    state: CombatState,
}

impl CombatSession {
    pub fn monster(&self) -> &Monster {
        &self.monster
    }

    /// Current round number, starting at 1.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    /// Weather captured when the fight began.
    pub fn weather(&self) -> WeatherKind {
        self.weather
    }

    pub fn is_guarding(&self) -> bool {
        self.guarding
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Current health of both sides.
    pub fn snapshot(&self, player: &Player) -> CombatSnapshot {
        CombatSnapshot {
            round: self.round,
            player_health: player.health,
            player_max_health: player.max_health,
            monster_name: self.monster.name.clone(),
            monster_health: self.monster.health,
            monster_max_health: self.monster.max_health,
            weather: self.weather,
        }
    }
}

/// Resolves combat rounds and hands victories to the progression engine.
#[derive(Debug, Clone)]
pub struct CombatEngine {
    progression: ProgressionEngine,
}

impl CombatEngine {
    pub fn new(progression: ProgressionEngine) -> Self {
        Self { progression }
    }

    /// Chance to escape from a monster with the given attack.
    ///
    /// `0.7 - attack / 100`, clamped to `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dragonquest::CombatEngine;
    ///
    /// assert!((CombatEngine::escape_chance(8) - 0.62).abs() < 1e-9);
    /// assert_eq!(CombatEngine::escape_chance(90), 0.0);
    /// ```
    pub fn escape_chance(monster_attack: i32) -> f64 {
        (config::ESCAPE_BASE_CHANCE - monster_attack as f64 / 100.0).clamp(0.0, 1.0)
    }

    /// Starts a fight against the first monster in `monsters`.
    ///
    /// The monster is moved out of the list for the duration of the fight and
    /// the current weather is captured. Use [`CombatEngine::finish`] to hand
    /// the monster back.
    pub fn begin(&self, monsters: &mut Vec<Monster>, weather: &Weather) -> QuestResult<CombatSession> {
        if monsters.is_empty() {
            return Err(QuestError::NoActiveEncounter);
        }
        let monster = monsters.remove(0);
        log::debug!(
            "Battle begins with {} ({} hp) in {} weather",
            monster.name,
            monster.health,
            weather.current()
        );

        Ok(CombatSession {
            monster,
            weather: weather.current(),
            round: 1,
            guarding: false,
            state: CombatState::Active,
        })
    }

    /// Ends a session, returning a surviving monster to the front of the list.
    ///
    /// A defeated monster is dropped. Returns the monster's name.
    pub fn finish(&self, session: CombatSession, monsters: &mut Vec<Monster>) -> String {
        let name = session.monster.name.clone();
        if session.state != CombatState::PlayerVictory {
            monsters.insert(0, session.monster);
        }
        name
    }

    /// Resolves one round for the given player action.
    ///
    /// A rejected action (missing or non-potion item, finished session)
    /// returns `InvalidAction` and consumes nothing.
    pub fn resolve<D: Dice + ?Sized>(
        &self,
        session: &mut CombatSession,
        player: &mut Player,
        action: CombatAction,
        dice: &mut D,
    ) -> QuestResult<RoundReport> {
        if session.is_over() {
            return Err(QuestError::InvalidAction(
                "The battle is already over".to_string(),
            ));
        }

        let round = session.round;
        let mut events = Vec::new();

        match action {
            CombatAction::Attack => {
                let attack = total_attack(player);
                let spread = config::PLAYER_DAMAGE_SPREAD;
                let roll = dice.roll(attack - spread, attack + spread);
                let modified = (roll as f64 * session.weather.combat_modifier()) as i32;
                let mut damage = mitigate(modified, session.monster.defense);
                let critical = dice.chance(config::CRIT_CHANCE);
                if critical {
                    damage *= config::CRIT_MULTIPLIER;
                }
                session.monster.health = (session.monster.health - damage).max(0);
                log::debug!(
                    "Round {}: {} rolls {} (x{}), deals {}{}",
                    round,
                    player.name,
                    roll,
                    session.weather.combat_modifier(),
                    damage,
                    if critical { " (critical)" } else { "" }
                );
                events.push(CombatEvent::PlayerHit {
                    damage,
                    critical,
                    monster_health: session.monster.health,
                });

                if !session.monster.is_alive() {
                    session.state = CombatState::PlayerVictory;
                    events.push(CombatEvent::MonsterDefeated {
                        name: session.monster.name.clone(),
                    });
                    let reward = self
                        .progression
                        .award_victory(player, &session.monster, round, dice);
                    events.push(CombatEvent::Rewarded(reward));
                    return Ok(RoundReport {
                        round,
                        events,
                        state: session.state,
                    });
                }
            }

            CombatAction::Defend => {
                session.guarding = true;
                events.push(CombatEvent::Guarded);
            }

            CombatAction::Run => {
                let chance = Self::escape_chance(session.monster.attack);
                if dice.chance(chance) {
                    session.state = CombatState::PlayerFled;
                    log::info!("{} fled from {}", player.name, session.monster.name);
                    events.push(CombatEvent::EscapeSucceeded);
                    return Ok(RoundReport {
                        round,
                        events,
                        state: session.state,
                    });
                }
                events.push(CombatEvent::EscapeFailed { chance });
            }

            CombatAction::UseItem(index) => {
                let (potion, healed) = player.drink_potion(index)?;
                events.push(CombatEvent::PotionUsed {
                    item: potion.name,
                    healed,
                });
            }
        }

        self.monster_turn(session, player, dice, &mut events);
        if session.state == CombatState::Active {
            session.round += 1;
        }

        Ok(RoundReport {
            round,
            events,
            state: session.state,
        })
    }

    /// The monster's counter-attack.
    fn monster_turn<D: Dice + ?Sized>(
        &self,
        session: &mut CombatSession,
        player: &mut Player,
        dice: &mut D,
        events: &mut Vec<CombatEvent>,
    ) {
        let attack = session.monster.attack;
        let spread = config::MONSTER_DAMAGE_SPREAD;
        let mut damage = dice.roll(attack - spread, attack + spread);

        let guarded = std::mem::take(&mut session.guarding);
        if guarded {
            damage /= 2;
        }

        let (new_health, actual_damage) = apply_damage(player.health, damage, total_defense(player));
        player.health = new_health;
        log::debug!(
            "{} hits {} for {}{}",
            session.monster.name,
            player.name,
            actual_damage,
            if guarded { " (guarded)" } else { "" }
        );
        events.push(CombatEvent::MonsterHit {
            damage: actual_damage,
            guarded,
            player_health: player.health,
        });

        if !player.is_alive() {
            session.state = CombatState::PlayerDefeated;
            log::info!("{} was slain by {}", player.name, session.monster.name);
            events.push(CombatEvent::PlayerDefeated {
                killer: session.monster.name.clone(),
            });
        }
    }
}
